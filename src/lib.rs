//! # TikTok Analytics
//!
//! Backend for a TikTok account analytics dashboard: stores per-post
//! engagement snapshots and serves aggregated statistics over a JSON API.
//!
//! ## Features
//!
//! - **Post store**: SQLite-backed snapshots keyed by account and post id
//! - **Aggregations**: per-account totals, daily view series, ranked posts
//! - **REST API**: Axum server consumed by the dashboard UI
//! - **CSV import**: bulk loading of scraped post data
//!
//! ## Modules
//!
//! - [`storage`]: Post snapshot persistence
//! - [`analytics`]: Aggregations over stored posts
//! - [`api`]: REST API server with Axum
//! - [`import`]: CSV post importer
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tiktok_analytics::analytics::AnalyticsEngine;
//! use tiktok_analytics::storage::{Post, PostStore, SortField};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(PostStore::open("./data/posts.db")?);
//!
//!     store.upsert_posts(&[
//!         Post::new("acme", "7301").counts(1_500, 80, 4, 2),
//!     ])?;
//!
//!     let engine = AnalyticsEngine::new(store);
//!     let stats = engine.account_stats("acme")?;
//!     println!("{} views over {} posts", stats.total_views, stats.total_posts);
//!
//!     let top = engine.top_posts("acme", 10, SortField::Likes)?;
//!     println!("Top post: {:?}", top.first().map(|p| &p.post_id));
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod import;
pub mod logging;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    AccountStats, DailyViews, Post, PostStore, SortField, StorageError, StorageResult,
};

pub use analytics::{AnalyticsEngine, AnalyticsError, AnalyticsResult};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config};

pub use import::{CsvImportResult, CsvPostImporter, ImportError};
