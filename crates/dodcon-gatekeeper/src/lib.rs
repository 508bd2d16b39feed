//! dodcon Gatekeeper
//!
//! Decides whether an annotator response may become a Contract.
//!
//! The Gatekeeper applies a fixed sequence of checks and stops at the first
//! failure:
//! 1. structurally a JSON object
//! 2. exactly the eight schema keys
//! 3. every field a string
//! 4. contract id long enough to be real
//! 5. no placeholder values ("N/A", "Not specified", "", ...)
//! 6. contract amount carries a currency marker
//! 7. completion date parses
//!
//! The outcome is binary. An accepted response comes back as a
//! [`ValidatedCandidate`], the only type the reconciler will accept.
//!
//! # Examples
//!
//! ```
//! use dodcon_gatekeeper::{Gatekeeper, ValidationStatus};
//! use serde_json::json;
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let result = gatekeeper.validate(&json!({"contract_id": "ABC-123"}));
//! assert_eq!(result.status, ValidationStatus::Rejected);
//! ```

#![warn(missing_docs)]

mod validator;
mod error;
mod config;

pub use validator::{
    Gatekeeper, RejectionReason, ValidatedCandidate, ValidationResult, ValidationStatus,
};
pub use error::GatekeeperError;
pub use config::ValidationConfig;
