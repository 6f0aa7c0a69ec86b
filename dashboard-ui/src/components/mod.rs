//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod account_selector;
pub mod accounts_overview;
pub mod daily_views_chart;
pub mod header;
pub mod loading;
pub mod stats_card;
pub mod top_posts_table;

pub use account_selector::AccountSelector;
pub use accounts_overview::AccountsOverview;
pub use daily_views_chart::DailyViewsChart;
pub use header::Header;
pub use loading::{CardSkeleton, Loading};
pub use stats_card::{StatColor, StatsCard};
pub use top_posts_table::TopPostsTable;
