//! Analytics error types

use thiserror::Error;

/// Errors that can occur while computing analytics
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// No posts are tracked for the account
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Unknown ranking field
    #[error("Invalid sort field '{0}'. Must be one of: views, likes, comments, shares")]
    InvalidSortField(String),

    /// Parameter outside its accepted range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
