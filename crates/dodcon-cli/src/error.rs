//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gatekeeper error
    #[error("Gatekeeper error: {0}")]
    Gatekeeper(#[from] dodcon_gatekeeper::GatekeeperError),

    /// Pipeline error
    #[error("{0}")]
    Extractor(#[from] dodcon_extractor::ExtractorError),

    /// Batch store error
    #[error("Store error: {0}")]
    Store(#[from] dodcon_store::StoreError),

    /// Corpus error
    #[error("Corpus error: {0}")]
    Corpus(#[from] dodcon_corpus::CorpusError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A worker task panicked or was cancelled
    #[error("Worker task failed: {0}")]
    Task(String),

    /// Some batches could not be processed
    #[error("{0} batch(es) failed")]
    BatchesFailed(usize),
}
