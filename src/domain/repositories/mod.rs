// Repository ports
// Persistence contracts the API depends on; adapters live in infrastructure

pub mod card_repository;
pub mod user_repository;

use thiserror::Error;

pub use card_repository::CardRepository;
pub use user_repository::UserRepository;

/// Errors returned by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write (e.g. duplicate email)
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The owning user referenced by a write does not exist
    #[error("unknown owner: {0}")]
    UnknownOwner(uuid::Uuid),

    /// A stored row could not be mapped back into a domain value
    #[error("data corruption: {0}")]
    DataCorruption(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
