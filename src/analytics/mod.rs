//! Account Analytics
//!
//! Computes what the dashboard displays from stored post snapshots:
//!
//! - **stats**: aggregate totals and average views per post
//! - **daily**: zero-filled daily view series
//! - **engine**: `AnalyticsEngine`, the store-backed entry point used by the API
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tiktok_analytics::analytics::AnalyticsEngine;
//! use tiktok_analytics::storage::PostStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(PostStore::open("./data/posts.db")?);
//!     let engine = AnalyticsEngine::new(store);
//!
//!     let series = engine.daily_views("acme", 30, chrono::Utc::now())?;
//!     println!("{} days of views", series.len());
//!
//!     Ok(())
//! }
//! ```

pub mod daily;
pub mod engine;
pub mod error;
pub mod stats;

pub use daily::bucket_daily_views;
pub use engine::{parse_sort_field, AnalyticsEngine, MAX_DAYS, MAX_RECENT_POSTS, MAX_TOP_POSTS};
pub use error::{AnalyticsError, AnalyticsResult};
pub use stats::summarize;
