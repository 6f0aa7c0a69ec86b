//! Account Routes
//!
//! - GET /api - Service banner
//! - GET /api/accounts - All tracked account handles
//! - GET /api/accounts/summary - Aggregate stats for every account

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::RootResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::storage::AccountStats;

/// GET /api
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "TikTok Analytics API".to_string(),
    })
}

/// GET /api/accounts
///
/// Sorted, de-duplicated account handles.
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let accounts = state.engine.accounts()?;
    Ok(Json(accounts))
}

/// GET /api/accounts/summary
///
/// One `AccountStats` per account, ordered by handle. Feeds the accounts
/// overview table.
pub async fn account_summaries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AccountStats>>> {
    let summaries = state.engine.account_summaries()?;
    tracing::debug!(accounts = summaries.len(), "Computed account summaries");
    Ok(Json(summaries))
}
