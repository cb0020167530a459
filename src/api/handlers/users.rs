use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

use crate::api::errors::{ApiError, INVALID_CREDENTIALS};
use crate::api::state::AppState;
use crate::auth::jwt::create_token;
use crate::domain::repositories::RepositoryError;
use crate::domain::user::{LoginCredentials, NewUser, User, LOGIN_SCHEMA, REGISTER_SCHEMA};
use crate::domain::validation::validate_body;

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
    /// Bearer token for endpoints that need the caller's identity
    pub token: String,
}

/// Register a new user
///
/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(body) = payload?;
    let new_user = validate_body(&body, REGISTER_SCHEMA).and_then(NewUser::from_record)?;

    // The unique index is the only duplicate check, so there is no window
    // between checking and inserting
    let user = state.users.insert_user(new_user).await.map_err(|e| {
        if matches!(e, RepositoryError::Conflict(_)) {
            tracing::info!("Registration rejected: email already registered");
        }
        ApiError::from(e)
    })?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and phone
///
/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = payload?;
    let credentials =
        validate_body(&body, LOGIN_SCHEMA).and_then(LoginCredentials::from_record)?;

    // Unknown email and wrong phone get the same response
    let user = state
        .users
        .find_by_email(&credentials.email)
        .await?
        .filter(|user| credentials.matches(user))
        .ok_or_else(|| {
            tracing::info!("Login rejected");
            ApiError::unauthorized(INVALID_CREDENTIALS)
        })?;

    let token = create_token(user.id, &state.jwt_secret).map_err(ApiError::internal_server_error)?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user,
        token,
    }))
}
