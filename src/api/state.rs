use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::repositories::{CardRepository, UserRepository};
use crate::infrastructure::repositories::{
    InMemoryRepository, PostgresCardRepository, PostgresUserRepository,
};

/// Shared handler state
///
/// Repositories are trait objects so the same router runs against
/// PostgreSQL in production and the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub cards: Arc<dyn CardRepository>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        cards: Arc<dyn CardRepository>,
        jwt_secret: &str,
    ) -> Self {
        Self {
            users,
            cards,
            jwt_secret: Arc::from(jwt_secret),
        }
    }

    /// State backed by the given connection pool
    pub fn postgres(pool: PgPool, jwt_secret: &str) -> Self {
        Self::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresCardRepository::new(pool)),
            jwt_secret,
        )
    }

    /// State backed by one shared in-memory store
    pub fn in_memory(store: Arc<InMemoryRepository>, jwt_secret: &str) -> Self {
        Self::new(store.clone(), store, jwt_secret)
    }
}
