//! GET /api/daily-views/:account?days=30 - zero-filled daily view series

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::DailyViewsParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::storage::DailyViews;

/// GET /api/daily-views/:account
///
/// `days + 1` points ending today (UTC). Accounts with no posts get an
/// all-zero series rather than a 404 so the chart can still render.
pub async fn get_daily_views(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
    params: Result<Query<DailyViewsParams>, QueryRejection>,
) -> ApiResult<Json<Vec<DailyViews>>> {
    let Query(params) = params?;
    let series = state
        .engine
        .daily_views(&account, params.days, chrono::Utc::now())?;
    Ok(Json(series))
}
