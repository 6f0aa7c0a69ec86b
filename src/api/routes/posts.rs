//! Post Routes
//!
//! - GET /api/posts/:account?limit=50 - Most recent posts of an account
//! - POST /api/posts - Upsert a batch of post snapshots

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{IngestPostsRequest, IngestPostsResponse, PostsParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::storage::Post;

/// Largest batch accepted by one ingest request
pub const MAX_BATCH_SIZE: usize = 5_000;

/// GET /api/posts/:account
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
    params: Result<Query<PostsParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Post>>> {
    let Query(params) = params?;
    let posts = state.engine.recent_posts(&account, params.limit)?;
    Ok(Json(posts))
}

/// POST /api/posts
///
/// Validates the whole batch before writing; a single bad post rejects the
/// request without writing anything.
pub async fn ingest_posts(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IngestPostsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<IngestPostsResponse>)> {
    let Json(req) = payload?;

    if req.posts.is_empty() {
        return Err(ApiError::Validation("posts cannot be empty".to_string()));
    }
    if req.posts.len() > MAX_BATCH_SIZE {
        return Err(ApiError::Validation(format!(
            "batch of {} posts exceeds maximum of {}",
            req.posts.len(),
            MAX_BATCH_SIZE
        )));
    }

    let accepted = state.store().upsert_posts(&req.posts)?;

    tracing::info!(accepted, "Ingested post snapshots");

    Ok((
        StatusCode::CREATED,
        Json(IngestPostsResponse {
            status: "ok".to_string(),
            accepted,
        }),
    ))
}
