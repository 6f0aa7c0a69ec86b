//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not plain
//! storage types. Posts, account stats and daily views are serialized
//! directly from `crate::storage`.

use serde::{Deserialize, Serialize};

use crate::storage::Post;

// ============================================
// QUERY PARAMETERS
// ============================================

/// `GET /api/posts/:account`
#[derive(Debug, Deserialize)]
pub struct PostsParams {
    #[serde(default = "default_posts_limit")]
    pub limit: usize,
}

fn default_posts_limit() -> usize {
    50
}

/// `GET /api/daily-views/:account`
#[derive(Debug, Deserialize)]
pub struct DailyViewsParams {
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    30
}

/// `GET /api/top-posts/:account`
#[derive(Debug, Deserialize)]
pub struct TopPostsParams {
    #[serde(default = "default_top_limit")]
    pub limit: usize,
    /// One of views, likes, comments, shares
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
}

fn default_top_limit() -> usize {
    10
}

fn default_sort_by() -> String {
    "views".to_string()
}

// ============================================
// INGEST DTOs
// ============================================

/// Batch of post snapshots to upsert
#[derive(Debug, Deserialize)]
pub struct IngestPostsRequest {
    pub posts: Vec<Post>,
}

/// Batch ingest response
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestPostsResponse {
    /// Status: "ok"
    pub status: String,
    /// Number of snapshots written
    pub accepted: usize,
}

// ============================================
// MISC DTOs
// ============================================

/// `GET /api`
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Full health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Storage status
    pub storage: String,
    /// Number of stored post snapshots, when storage is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<u64>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
