//! GET /api/stats/:account - aggregate totals for one account

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::storage::AccountStats;

/// GET /api/stats/:account
///
/// Returns 404 when no posts are tracked for the account.
pub async fn get_account_stats(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> ApiResult<Json<AccountStats>> {
    let stats = state.engine.account_stats(&account)?;
    Ok(Json(stats))
}
