//! HTTP server module
//!
//! Exposes `GET /comments/{forum_name}` and `GET /health` over axum.

mod error;
mod middleware;
mod params;
mod routes;
mod state;

pub use error::{ApiError, ApiResult};
pub use params::{parse_timestamp, sort_by_polarity, CommentsParams, CommentsQuery, SortOrder};
pub use routes::{get_comments, health, HealthResponse};
pub use state::AppState;

use axum::{middleware::from_fn, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/comments/:forum_name", get(get_comments))
        .layer(from_fn(middleware::log_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
