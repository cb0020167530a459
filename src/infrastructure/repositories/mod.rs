// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_repository;
pub mod postgres_card_repository;
pub mod postgres_user_repository;

pub use in_memory_repository::InMemoryRepository;
pub use postgres_card_repository::PostgresCardRepository;
pub use postgres_user_repository::PostgresUserRepository;
