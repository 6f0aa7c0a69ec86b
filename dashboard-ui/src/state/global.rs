//! Global Application State
//!
//! Reactive state management using Leptos signals.

use chrono::{DateTime, Utc};
use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Tracked account handles, for the selector
    pub accounts: RwSignal<Vec<String>>,
    /// Summaries for every tracked account
    pub summaries: RwSignal<Vec<AccountStats>>,
    /// Currently selected account handle
    pub selected_account: RwSignal<Option<String>>,
    /// Stats for the selected account
    pub stats: RwSignal<Option<AccountStats>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
}

/// Aggregate stats for one account
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct AccountStats {
    #[serde(alias = "account")]
    pub username: String,
    pub total_posts: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub avg_views_per_post: f64,
}

/// One point of the daily views series
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct DailyViews {
    /// `YYYY-MM-DD`
    pub date: String,
    pub views: u64,
}

/// A post snapshot as served by the API
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct PostView {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "account")]
    pub username: String,
    pub post_id: String,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
    pub shares: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        accounts: create_rw_signal(Vec::new()),
        summaries: create_rw_signal(Vec::new()),
        selected_account: create_rw_signal(None),
        stats: create_rw_signal(None),
        loading: create_rw_signal(false),
    };

    provide_context(state);
}

impl GlobalState {
    /// Select an account, dropping stats that belong to the previous one
    pub fn select_account(&self, account: String) {
        if self.selected_account.get_untracked().as_deref() == Some(account.as_str()) {
            return;
        }
        self.stats.set(None);
        self.selected_account.set(Some(account));
    }

    /// True while `account` is still the selected one
    pub fn is_current(&self, account: &str) -> bool {
        is_current_response(account, self.selected_account.get_untracked().as_deref())
    }
}

/// A response fetched for `requested` may only be applied while that
/// account is still selected.
pub fn is_current_response(requested: &str, selected: Option<&str>) -> bool {
    selected == Some(requested)
}

/// Account to select once summaries arrive: keep the current selection,
/// otherwise pick the first account.
pub fn initial_selection(summaries: &[AccountStats], selected: Option<&str>) -> Option<String> {
    match selected {
        Some(_) => None,
        None => summaries.first().map(|s| s.username.clone()),
    }
}
