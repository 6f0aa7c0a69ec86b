//! Storage error types
//!
//! Defines all errors that can occur in the post store.

use thiserror::Error;

/// Errors that can occur in the post store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite statement failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Post failed validation before being written
    #[error("Invalid post: {0}")]
    InvalidPost(String),

    /// Stored value could not be decoded
    #[error("Corrupt data: {0}")]
    Corruption(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
