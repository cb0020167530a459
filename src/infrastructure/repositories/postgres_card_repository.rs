use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::card::{Card, CardStatus, NewCard, Orientation};
use crate::domain::repositories::{CardRepository, RepositoryError};

/// PostgreSQL implementation of CardRepository
///
/// `Created_Date` and `Modified_Date` come from the database clock.
#[derive(Clone)]
pub struct PostgresCardRepository {
    pool: PgPool,
}

impl PostgresCardRepository {
    /// Creates a new PostgresCardRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CardRow {
    id: Uuid,
    user_id: Uuid,
    occasion: String,
    recipient: String,
    orientation: String,
    publisher_sku: String,
    cardwithgift_sku: String,
    created_date: DateTime<Utc>,
    modified_date: DateTime<Utc>,
    activation_date: Option<NaiveDate>,
    deactivation_date: Option<NaiveDate>,
    front: String,
    inside_left: Option<String>,
    inside_right: Option<String>,
    back: String,
    uploaded_by: Option<String>,
    status: String,
}

impl TryFrom<CardRow> for Card {
    type Error = RepositoryError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        let orientation = row
            .orientation
            .parse::<Orientation>()
            .map_err(RepositoryError::DataCorruption)?;
        let status = row
            .status
            .parse::<CardStatus>()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Card {
            id: row.id,
            user_id: row.user_id,
            occasion: row.occasion,
            recipient: row.recipient,
            orientation,
            publisher_sku: row.publisher_sku,
            cardwithgift_sku: row.cardwithgift_sku,
            created_date: row.created_date,
            modified_date: row.modified_date,
            activation_date: row.activation_date,
            deactivation_date: row.deactivation_date,
            front: row.front,
            inside_left: row.inside_left,
            inside_right: row.inside_right,
            back: row.back,
            uploaded_by: row.uploaded_by,
            status,
        })
    }
}

#[async_trait]
impl CardRepository for PostgresCardRepository {
    async fn insert_card(&self, card: NewCard, owner_id: Uuid) -> Result<Card, RepositoryError> {
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            INSERT INTO cards (
                user_id, occasion, recipient, orientation, publisher_sku,
                cardwithgift_sku, activation_date, deactivation_date,
                front, inside_left, inside_right, back, uploaded_by, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING
                id, user_id, occasion, recipient, orientation, publisher_sku,
                cardwithgift_sku, created_date, modified_date, activation_date,
                deactivation_date, front, inside_left, inside_right, back,
                uploaded_by, status
            "#,
        )
        .bind(owner_id)
        .bind(&card.occasion)
        .bind(&card.recipient)
        .bind(card.orientation.as_str())
        .bind(&card.publisher_sku)
        .bind(&card.cardwithgift_sku)
        .bind(card.activation_date)
        .bind(card.deactivation_date)
        .bind(&card.front)
        .bind(&card.inside_left)
        .bind(&card.inside_right)
        .bind(&card.back)
        .bind(&card.uploaded_by)
        .bind(card.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, owner_id))?;

        Card::try_from(row)
    }
}

fn map_insert_error(err: sqlx::Error, owner_id: Uuid) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return RepositoryError::UnknownOwner(owner_id);
        }
    }
    RepositoryError::Database(err)
}
