//! API Routes
//!
//! Route handlers organized by functionality.

pub mod accounts;
pub mod daily_views;
pub mod health;
pub mod posts;
pub mod stats;
pub mod top_posts;
