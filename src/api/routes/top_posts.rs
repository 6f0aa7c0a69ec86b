//! GET /api/top-posts/:account?limit=10&sort_by=views - ranked posts

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::analytics::parse_sort_field;
use crate::api::dto::TopPostsParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::storage::Post;

/// GET /api/top-posts/:account
///
/// Unknown `sort_by` values are rejected with 400.
pub async fn get_top_posts(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
    params: Result<Query<TopPostsParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Post>>> {
    let Query(params) = params?;
    let sort = parse_sort_field(&params.sort_by)?;
    let posts = state.engine.top_posts(&account, params.limit, sort)?;
    Ok(Json(posts))
}
