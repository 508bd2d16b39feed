//! Error types for corpus building

use thiserror::Error;

/// Errors that can occur while building or writing the NER corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Batch store error
    #[error("Store error: {0}")]
    Store(#[from] dodcon_store::StoreError),

    /// Corpus file does not have the expected shape
    #[error("Invalid corpus data: {0}")]
    InvalidData(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CorpusError {
    fn from(e: serde_json::Error) -> Self {
        CorpusError::InvalidData(e.to_string())
    }
}
