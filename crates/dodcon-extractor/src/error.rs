//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while turning annotations into contracts
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Annotation line is not a JSON object
    #[error("Invalid annotation format: {0}")]
    InvalidFormat(String),

    /// Precontracts and annotation lines are not one-to-one
    #[error(
        "Misaligned batch: {precontracts} precontracts but {annotations} annotation lines"
    )]
    Misaligned {
        /// Number of precontracts in the batch
        precontracts: usize,
        /// Number of annotation lines in the batch
        annotations: usize,
    },

    /// A validated candidate failed to convert; the gatekeeper and the
    /// reconciler disagree
    #[error("Internal inconsistency: {0}")]
    Inconsistency(String),

    /// Batch store error
    #[error("Store error: {0}")]
    Store(#[from] dodcon_store::StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
