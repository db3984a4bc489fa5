//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{echo, greeting, health, metrics, sum, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/healthz", get(health))
        .route("/", get(greeting))
        // Versioned API
        .route("/api/v1/echo", get(echo))
        .route("/api/v1/sum", post(sum))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
