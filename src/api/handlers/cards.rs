use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::middleware::AuthenticatedUser;
use crate::api::state::AppState;
use crate::domain::card::{Card, NewCard};

/// Upload a card owned by the caller
///
/// POST /api/addCard
pub async fn add_card(
    State(state): State<AppState>,
    AuthenticatedUser(owner_id): AuthenticatedUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    let Json(body) = payload?;
    let new_card = NewCard::from_body(&body)?;

    let card = state.cards.insert_card(new_card, owner_id).await?;

    tracing::info!(card_id = %card.id, user_id = %owner_id, "Card added");
    Ok((StatusCode::CREATED, Json(card)))
}
