//! HTTP API Client
//!
//! Functions for communicating with the TikTok Analytics REST API.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::state::global::{AccountStats, DailyViews, PostView};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Local storage key that overrides [`DEFAULT_API_BASE`]
const API_URL_KEY: &str = "tiktok_analytics_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

// ============ API Functions ============

/// Fetch all tracked account handles
pub async fn fetch_accounts() -> Result<Vec<String>, String> {
    get_json(&format!("{}/accounts", get_api_base())).await
}

/// Fetch summaries for every account
pub async fn fetch_account_summaries() -> Result<Vec<AccountStats>, String> {
    get_json(&format!("{}/accounts/summary", get_api_base())).await
}

/// Fetch aggregate stats for one account
pub async fn fetch_stats(account: &str) -> Result<AccountStats, String> {
    get_json(&account_url("stats", account)).await
}

/// Fetch the daily views series ending today
pub async fn fetch_daily_views(account: &str, days: u32) -> Result<Vec<DailyViews>, String> {
    get_json(&format!("{}?days={}", account_url("daily-views", account), days)).await
}

/// Fetch ranked posts
pub async fn fetch_top_posts(
    account: &str,
    limit: usize,
    sort_by: &str,
) -> Result<Vec<PostView>, String> {
    get_json(&format!(
        "{}?limit={}&sort_by={}",
        account_url("top-posts", account),
        limit,
        sort_by
    ))
    .await
}

fn account_url(resource: &str, account: &str) -> String {
    format!(
        "{}/{}/{}",
        get_api_base(),
        resource,
        urlencoding::encode(account)
    )
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let status = response.status();
        return Err(match response.json::<ApiErrorResponse>().await {
            Ok(body) => format!("{} ({}): {}", body.error.code, status, body.error.message),
            Err(_) => format!("Request failed with status {}", status),
        });
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
