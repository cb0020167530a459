use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::card::{Card, NewCard};

/// Repository trait for uploaded cards
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Store a card owned by `owner_id` and return the stored row
    ///
    /// Returns `RepositoryError::UnknownOwner` if no such user exists.
    async fn insert_card(&self, card: NewCard, owner_id: Uuid) -> Result<Card, RepositoryError>;
}
