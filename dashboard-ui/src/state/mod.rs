//! State Management
//!
//! Global application state shared by the dashboard widgets.

pub mod global;

pub use global::{provide_global_state, AccountStats, DailyViews, GlobalState, PostView};
