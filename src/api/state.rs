//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::analytics::AnalyticsEngine;
use crate::config::ApiConfig;
use crate::storage::PostStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Analytics over the post store
    pub engine: Arc<AnalyticsEngine>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: Arc<AnalyticsEngine>, config: ApiConfig) -> Self {
        Self {
            engine,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Build state directly on top of a store
    pub fn from_store(store: Arc<PostStore>, config: ApiConfig) -> Self {
        Self::new(Arc::new(AnalyticsEngine::new(store)), config)
    }

    /// Post store behind the analytics engine
    pub fn store(&self) -> &PostStore {
        self.engine.store()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
