//! Error types for the batch store

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Batch file is not valid JSON for its type
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Batch file not found
    #[error("Batch not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
