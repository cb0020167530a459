use std::fmt::Display;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::repositories::RepositoryError;
use crate::domain::validation::ValidationErrors;

/// Body returned for duplicate registrations
pub const EMAIL_TAKEN: &str = "Email is already registered";
/// Body returned for every failed login, whatever the cause
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// API error type with HTTP status code and body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    body: ErrorBody,
}

#[derive(Debug, PartialEq, Eq)]
enum ErrorBody {
    /// `{"error": "..."}`
    Message(String),
    /// `{"errors": ["...", ...]}`
    Violations(Vec<String>),
    /// Plain text, no detail
    Internal,
}

impl ApiError {
    /// Creates a new API error with a single message
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody::Message(message.into()),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 400 Bad Request error listing every rule violation
    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Violations(errors.into_messages()),
        }
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 500 Internal Server Error
    ///
    /// The cause is logged; the caller only sees a plain-text body.
    pub fn internal_server_error(cause: impl Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.body {
            ErrorBody::Message(message) => {
                (self.status, Json(json!({ "error": message }))).into_response()
            }
            ErrorBody::Violations(errors) => {
                (self.status, Json(json!({ "errors": errors }))).into_response()
            }
            ErrorBody::Internal => (self.status, INTERNAL_SERVER_ERROR).into_response(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(ValidationErrors::single(rejection.body_text()))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => Self::bad_request(EMAIL_TAKEN),
            RepositoryError::UnknownOwner(_) => Self::unauthorized(INVALID_CREDENTIALS),
            other => Self::internal_server_error(other),
        }
    }
}
