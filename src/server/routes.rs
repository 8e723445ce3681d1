use crate::aggregate::EnrichedComment;
use crate::server::error::{ApiError, ApiResult};
use crate::server::params::{sort_by_polarity, CommentsParams};
use crate::server::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// `GET /comments/{forum_name}`
///
/// Returns up to `limit` recent comments of the named forum with their sentiment,
/// optionally restricted to `[start, end]` and ordered by polarity. The whole
/// lookup is bounded by `server.request-timeout-secs`.
pub async fn get_comments(
    State(state): State<Arc<AppState>>,
    Path(forum_name): Path<String>,
    params: Result<Query<CommentsParams>, QueryRejection>,
) -> ApiResult<Json<Vec<EnrichedComment>>> {
    tracing::info!("Received request for comments from subfeddit: '{}'", forum_name);

    let Query(params) = params.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let query = params.validate(&state.config.comments)?;

    let timeout_secs = state.config.server.request_timeout_secs;
    let mut comments = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        state
            .aggregator
            .comments_for_forum(&forum_name, query.limit, &query.range, &state.shutdown),
    )
    .await
    .map_err(|_| ApiError::Internal(format!("Request timed out after {}s", timeout_secs)))??;

    if let Some(order) = query.sort {
        sort_by_polarity(&mut comments, order);
    }

    tracing::info!("Successfully retrieved comments for subfeddit: '{}'", forum_name);

    Ok(Json(comments))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`, liveness only
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
