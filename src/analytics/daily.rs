//! Daily view series
//!
//! Buckets post views by UTC calendar date and zero-fills every date of the
//! window so that the chart always gets a contiguous series.

use crate::storage::{DailyViews, Post};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Sum views per day for posts published within `[start, end]`
///
/// Emits one point for every date from `start`'s date through `end`'s date
/// inclusive. Posts without a publish time, or outside the window, are
/// ignored.
pub fn bucket_daily_views(
    posts: &[Post],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<DailyViews> {
    if end < start {
        return Vec::new();
    }

    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for post in posts {
        let Some(created_at) = post.created_at else {
            continue;
        };
        if created_at < start || created_at > end {
            continue;
        }
        let day = by_date.entry(created_at.date_naive()).or_insert(0);
        *day = day.saturating_add(post.views);
    }

    let last = end.date_naive();
    let mut current = start.date_naive();
    let mut series = Vec::new();

    while current <= last {
        series.push(DailyViews {
            date: current.format("%Y-%m-%d").to_string(),
            views: by_date.get(&current).copied().unwrap_or(0),
        });
        current += Duration::days(1);
    }

    series
}
