//! Core data types for the post store
//!
//! - `Post`: engagement snapshot of a single TikTok post
//! - `AccountStats`: aggregate totals for one account
//! - `DailyViews`: one point of a daily view series
//! - `SortField`: ranking key for top posts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Engagement snapshot of a single post
///
/// Re-ingesting the same `(username, post_id)` pair replaces the counters
/// of the earlier snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Row identifier assigned by the store
    #[serde(default)]
    pub id: Option<i64>,
    /// Handle of the owning account
    #[serde(alias = "account")]
    pub username: String,
    /// TikTok video identifier
    pub post_id: String,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
    pub shares: u64,
    /// When the post was published
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-form date label carried through from the source
    #[serde(default)]
    pub date: Option<String>,
    /// Canonical link to the post
    #[serde(default)]
    pub url: Option<String>,
}

impl Post {
    /// Create a snapshot with zeroed counters
    pub fn new(username: impl Into<String>, post_id: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            post_id: post_id.into(),
            likes: 0,
            views: 0,
            comments: 0,
            shares: 0,
            created_at: None,
            date: None,
            url: None,
        }
    }

    /// Builder method: set all four counters
    pub fn counts(mut self, views: u64, likes: u64, comments: u64, shares: u64) -> Self {
        self.views = views;
        self.likes = likes;
        self.comments = comments;
        self.shares = shares;
        self
    }

    /// Builder method: set the publish time
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builder method: set the canonical URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Value of the given counter
    pub fn metric(&self, field: SortField) -> u64 {
        match field {
            SortField::Views => self.views,
            SortField::Likes => self.likes,
            SortField::Comments => self.comments,
            SortField::Shares => self.shares,
        }
    }
}

/// Aggregate totals over all tracked posts of one account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountStats {
    #[serde(alias = "account")]
    pub username: String,
    pub total_posts: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    /// `total_views / total_posts`, rounded to two decimals
    pub avg_views_per_post: f64,
}

/// Views summed over one UTC calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyViews {
    /// `YYYY-MM-DD`
    pub date: String,
    pub views: u64,
}

/// Counter used to rank top posts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Views,
    Likes,
    Comments,
    Shares,
}

impl SortField {
    /// Column holding this counter in the `posts` table
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Views => "views",
            SortField::Likes => "likes",
            SortField::Comments => "comments",
            SortField::Shares => "shares",
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "views" => Ok(SortField::Views),
            "likes" => Ok(SortField::Likes),
            "comments" => Ok(SortField::Comments),
            "shares" => Ok(SortField::Shares),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_accepts_account_alias() {
        let json = r#"{"account": "acme", "post_id": "7301", "likes": 3, "views": 10, "comments": 1, "shares": 0}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.username, "acme");
        assert_eq!(post.views, 10);
        assert!(post.created_at.is_none());
    }

    #[test]
    fn test_post_serializes_username() {
        let post = Post::new("acme", "1").counts(1, 2, 3, 4);
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["username"], "acme");
        assert_eq!(value["shares"], 4);
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!("likes".parse::<SortField>(), Ok(SortField::Likes));
        assert_eq!("shares".parse::<SortField>(), Ok(SortField::Shares));
        assert!("Views".parse::<SortField>().is_err());
        assert!("followers".parse::<SortField>().is_err());
    }

    #[test]
    fn test_metric_by_field() {
        let post = Post::new("acme", "1").counts(100, 20, 3, 4);
        assert_eq!(post.metric(SortField::Views), 100);
        assert_eq!(post.metric(SortField::Comments), 3);
    }
}
