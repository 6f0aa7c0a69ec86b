//! Post Storage
//!
//! SQLite-backed storage of TikTok post snapshots:
//!
//! - **types**: Core data structures (Post, AccountStats, DailyViews, SortField)
//! - **store**: The `PostStore` table wrapper
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use tiktok_analytics::storage::{Post, PostStore, SortField};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostStore::open("./data/posts.db")?;
//!
//!     store.upsert_posts(&[Post::new("acme", "7301").counts(1200, 80, 4, 2)])?;
//!
//!     let top = store.top_posts("acme", SortField::Views, 10)?;
//!     println!("Top post: {:?}", top.first());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use store::PostStore;
pub use types::{AccountStats, DailyViews, Post, SortField};
