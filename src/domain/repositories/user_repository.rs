use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::user::{Email, NewUser, User};

/// Repository trait for registered users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Store a new user and return the stored row
    ///
    /// Assigns the surrogate id and creation time. Returns
    /// `RepositoryError::Conflict` when the email is already registered; the
    /// check and the write are a single atomic step.
    async fn insert_user(&self, user: NewUser) -> Result<User, RepositoryError>;
}
