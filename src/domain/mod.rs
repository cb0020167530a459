// Domain layer module exports
// Payload validation, entities, and repository ports
// Domain is independent of infrastructure concerns

pub mod card;
pub mod repositories;
pub mod user;
pub mod validation;
