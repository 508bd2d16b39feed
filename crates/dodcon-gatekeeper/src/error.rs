//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur during gatekeeper operations
///
/// Rejections are not errors; they come back as a `ValidationResult`.
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
