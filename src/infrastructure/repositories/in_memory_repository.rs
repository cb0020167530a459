use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::card::{Card, NewCard};
use crate::domain::repositories::{CardRepository, RepositoryError, UserRepository};
use crate::domain::user::{Email, NewUser, User};

/// Process-local store implementing both repository ports
///
/// Backs the HTTP tests; the server itself always runs on PostgreSQL. The
/// uniqueness check and the insert happen under one lock, so concurrent
/// registrations of the same email cannot both succeed.
#[derive(Default)]
pub struct InMemoryRepository {
    inner: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    users: HashMap<Email, User>,
    cards: Vec<Card>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards stored for `owner_id`, oldest first
    pub fn cards_owned_by(&self, owner_id: Uuid) -> Result<Vec<Card>, RepositoryError> {
        let store = self.lock()?;
        Ok(store
            .cards
            .iter()
            .filter(|card| card.user_id == owner_id)
            .cloned()
            .collect())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Store>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::DataCorruption("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.users.get(email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut store = self.lock()?;
        if store.users.contains_key(&user.email) {
            return Err(RepositoryError::Conflict(
                "email already registered".to_string(),
            ));
        }

        let stored = user.into_user(Uuid::new_v4(), Utc::now());
        store.users.insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl CardRepository for InMemoryRepository {
    async fn insert_card(&self, card: NewCard, owner_id: Uuid) -> Result<Card, RepositoryError> {
        let mut store = self.lock()?;
        if !store.users.values().any(|user| user.id == owner_id) {
            return Err(RepositoryError::UnknownOwner(owner_id));
        }

        let stored = card.into_card(Uuid::new_v4(), owner_id, Utc::now());
        store.cards.push(stored.clone());
        Ok(stored)
    }
}
