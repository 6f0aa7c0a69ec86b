//! Analytics Engine
//!
//! Answers the dashboard's questions on top of the post store: per-account
//! totals, daily view series and post rankings.

use super::daily::bucket_daily_views;
use super::error::{AnalyticsError, AnalyticsResult};
use super::stats::summarize;
use crate::storage::{AccountStats, DailyViews, Post, PostStore, SortField};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Longest daily-views window, in days
pub const MAX_DAYS: i64 = 365;
/// Largest page of ranked posts
pub const MAX_TOP_POSTS: usize = 100;
/// Largest page of recent posts
pub const MAX_RECENT_POSTS: usize = 500;

/// Computes account analytics from stored post snapshots
pub struct AnalyticsEngine {
    store: Arc<PostStore>,
}

impl AnalyticsEngine {
    pub fn new(store: Arc<PostStore>) -> Self {
        Self { store }
    }

    /// Underlying post store
    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// All tracked account handles, sorted
    pub fn accounts(&self) -> AnalyticsResult<Vec<String>> {
        Ok(self.store.accounts()?)
    }

    /// Aggregate totals for one account
    pub fn account_stats(&self, account: &str) -> AnalyticsResult<AccountStats> {
        let posts = self.store.posts_for_account(account)?;
        if posts.is_empty() {
            return Err(AnalyticsError::AccountNotFound(account.to_string()));
        }
        Ok(summarize(account, &posts))
    }

    /// Aggregate totals for every account, ordered by handle
    pub fn account_summaries(&self) -> AnalyticsResult<Vec<AccountStats>> {
        let accounts = self.store.accounts()?;
        let mut summaries = Vec::with_capacity(accounts.len());

        for account in accounts {
            let posts = self.store.posts_for_account(&account)?;
            summaries.push(summarize(&account, &posts));
        }

        Ok(summaries)
    }

    /// Views per day over the `days` days leading up to `now`
    ///
    /// Returns `days + 1` points, one per calendar date in the window.
    pub fn daily_views(
        &self,
        account: &str,
        days: i64,
        now: DateTime<Utc>,
    ) -> AnalyticsResult<Vec<DailyViews>> {
        if !(1..=MAX_DAYS).contains(&days) {
            return Err(AnalyticsError::InvalidParameter(format!(
                "days must be between 1 and {}, got {}",
                MAX_DAYS, days
            )));
        }

        let start = now - Duration::days(days);
        let posts = self.store.posts_between(account, start, now)?;

        tracing::debug!(
            account = %account,
            days,
            posts = posts.len(),
            "Computing daily views"
        );

        Ok(bucket_daily_views(&posts, start, now))
    }

    /// Highest-ranked posts by `sort`
    pub fn top_posts(
        &self,
        account: &str,
        limit: usize,
        sort: SortField,
    ) -> AnalyticsResult<Vec<Post>> {
        check_limit(limit, MAX_TOP_POSTS)?;
        Ok(self.store.top_posts(account, sort, limit)?)
    }

    /// Most recently published posts
    pub fn recent_posts(&self, account: &str, limit: usize) -> AnalyticsResult<Vec<Post>> {
        check_limit(limit, MAX_RECENT_POSTS)?;
        Ok(self.store.recent_posts(account, limit)?)
    }
}

/// Parse a `sort_by` query value
pub fn parse_sort_field(s: &str) -> AnalyticsResult<SortField> {
    s.parse::<SortField>()
        .map_err(AnalyticsError::InvalidSortField)
}

fn check_limit(limit: usize, max: usize) -> AnalyticsResult<()> {
    if limit == 0 || limit > max {
        return Err(AnalyticsError::InvalidParameter(format!(
            "limit must be between 1 and {}, got {}",
            max, limit
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn engine_with_posts(posts: &[Post]) -> AnalyticsEngine {
        let store = Arc::new(PostStore::in_memory().unwrap());
        store.upsert_posts(posts).unwrap();
        AnalyticsEngine::new(store)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_account_stats() {
        let engine = engine_with_posts(&[
            Post::new("acme", "1").counts(1000, 100, 10, 1),
            Post::new("acme", "2").counts(3000, 300, 30, 3),
            Post::new("other", "1").counts(5, 5, 5, 5),
        ]);

        let stats = engine.account_stats("acme").unwrap();
        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.total_views, 4000);
        assert_eq!(stats.avg_views_per_post, 2000.0);
    }

    #[test]
    fn test_account_stats_not_found() {
        let engine = engine_with_posts(&[]);
        assert!(matches!(
            engine.account_stats("nobody"),
            Err(AnalyticsError::AccountNotFound(name)) if name == "nobody"
        ));
    }

    #[test]
    fn test_account_stats_with_max_stored_counters() {
        let huge = i64::MAX as u64;
        let engine = engine_with_posts(&[
            Post::new("acme", "1").counts(huge, 0, 0, 0),
            Post::new("acme", "2").counts(huge, 0, 0, 0),
            Post::new("acme", "3").counts(huge, 0, 0, 0),
        ]);

        let stats = engine.account_stats("acme").unwrap();
        assert_eq!(stats.total_posts, 3);
        assert_eq!(stats.total_views, u64::MAX);

        let summaries = engine.account_summaries().unwrap();
        assert_eq!(summaries[0].total_views, u64::MAX);
    }

    #[test]
    fn test_account_summaries_ordered() {
        let engine = engine_with_posts(&[
            Post::new("zeta", "1").counts(1, 0, 0, 0),
            Post::new("acme", "1").counts(2, 0, 0, 0),
            Post::new("acme", "2").counts(4, 0, 0, 0),
        ]);

        let summaries = engine.account_summaries().unwrap();
        let names: Vec<_> = summaries.iter().map(|s| s.username.as_str()).collect();
        assert_eq!(names, vec!["acme", "zeta"]);
        assert_eq!(summaries[0].total_views, 6);
        assert_eq!(summaries[0].avg_views_per_post, 3.0);
    }

    #[test]
    fn test_daily_views_window() {
        let engine = engine_with_posts(&[
            Post::new("acme", "1")
                .counts(40, 0, 0, 0)
                .created_at(now() - Duration::hours(1)),
            Post::new("acme", "2")
                .counts(60, 0, 0, 0)
                .created_at(now() - Duration::days(2)),
            Post::new("acme", "old")
                .counts(1000, 0, 0, 0)
                .created_at(now() - Duration::days(40)),
        ]);

        let series = engine.daily_views("acme", 30, now()).unwrap();
        assert_eq!(series.len(), 31);
        assert_eq!(series.last().unwrap().date, "2024-06-30");
        assert_eq!(series.last().unwrap().views, 40);
        assert_eq!(series[series.len() - 3].views, 60);
        assert_eq!(series.iter().map(|p| p.views).sum::<u64>(), 100);
    }

    #[test]
    fn test_daily_views_rejects_bad_days() {
        let engine = engine_with_posts(&[]);
        assert!(matches!(
            engine.daily_views("acme", 0, now()),
            Err(AnalyticsError::InvalidParameter(_))
        ));
        assert!(engine.daily_views("acme", MAX_DAYS + 1, now()).is_err());
        assert_eq!(engine.daily_views("acme", 1, now()).unwrap().len(), 2);
    }

    #[test]
    fn test_top_posts_limit_bounds() {
        let engine = engine_with_posts(&[
            Post::new("acme", "1").counts(10, 3, 0, 0),
            Post::new("acme", "2").counts(20, 1, 0, 0),
        ]);

        let top = engine.top_posts("acme", 1, SortField::Likes).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].post_id, "1");

        assert!(engine.top_posts("acme", 0, SortField::Views).is_err());
        assert!(engine
            .top_posts("acme", MAX_TOP_POSTS + 1, SortField::Views)
            .is_err());
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!(parse_sort_field("comments").unwrap(), SortField::Comments);
        assert!(matches!(
            parse_sort_field("followers"),
            Err(AnalyticsError::InvalidSortField(f)) if f == "followers"
        ));
    }
}
