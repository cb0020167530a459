use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{cards, health, users};
use crate::api::state::AppState;

/// Builds the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/register", post(users::register))
        .route("/api/login", post(users::login))
        .route("/api/addCard", post(cards::add_card))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
