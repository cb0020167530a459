//! CardWithGifts API Library
//!
//! Registration, login, and card upload endpoints backed by PostgreSQL:
//! declarative payload validation, repository ports and adapters, and the
//! axum router that ties them together.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
