//! Health Routes
//!
//! Health check endpoints for monitoring and orchestrator health checks.
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the post store answers queries, 503 otherwise.
pub async fn readiness(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state
        .store()
        .post_count()
        .map(|_| StatusCode::OK)
        .map_err(|e| ApiError::ServiceUnavailable(format!("post store: {}", e)))
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let total_posts = state.store().post_count().ok();

    let (status_code, status, storage) = match total_posts {
        Some(_) => (StatusCode::OK, "healthy", "ok"),
        None => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "error"),
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            storage: storage.to_string(),
            total_posts,
            uptime_seconds: state.uptime_seconds(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
