use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::user::{Email, NewUser, PhoneType, User};

const USER_COLUMNS: &str = "id, company_name, phone, phone_type, email, street_address, \
                            address2, city, state, zip_code, created_at";

/// PostgreSQL implementation of UserRepository
///
/// Relies on the `users_email_key` unique index for duplicate detection.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    company_name: Option<String>,
    phone: Option<String>,
    phone_type: String,
    email: String,
    street_address: Option<String>,
    address2: Option<String>,
    city: String,
    state: String,
    zip_code: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {}", e))
        })?;
        let phone_type = row.phone_type.parse::<PhoneType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone type in database: {}", e))
        })?;

        Ok(User {
            id: row.id,
            company_name: row.company_name,
            phone: row.phone,
            phone_type,
            email,
            street_address: row.street_address,
            address2: row.address2,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                company_name, phone, phone_type, email, street_address,
                address2, city, state, zip_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.company_name)
        .bind(&user.phone)
        .bind(user.phone_type.as_str())
        .bind(user.email.as_str())
        .bind(&user.street_address)
        .bind(&user.address2)
        .bind(&user.city)
        .bind(&user.state)
        .bind(&user.zip_code)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        User::try_from(row)
    }
}

fn map_insert_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict("email already registered".to_string());
        }
    }
    RepositoryError::Database(err)
}
