//! dodcon Domain Layer
//!
//! Core data model for the defense contract annotation pipeline, plus the
//! leaf parsers every other crate depends on.
//!
//! ## Key Concepts
//!
//! - **Precontract**: a scraped, unannotated announcement (source of truth
//!   for branch, source reference, date and raw text)
//! - **Annotation Candidate**: untrusted, LLM-produced JSON object; never
//!   mixed up with a validated record
//! - **Contract**: a validated, typed, fully reconciled output record
//! - **Field**: the fixed eight-field annotation schema
//!
//! ## Parsers
//!
//! - [`parse_date`] turns "April 16, 2034", "Jan. 5, 2024" or "Jan, 2025"
//!   into a calendar date
//! - [`parse_money`] / [`format_money`] convert between "$26,991,707" and
//!   a numeric amount

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod contract;
pub mod date;
pub mod fields;
pub mod money;
pub mod precontract;

// Re-exports for convenience
pub use candidate::AnnotationCandidate;
pub use contract::Contract;
pub use date::{format_long_date, format_long_date_unpadded, normalize_month, parse_date};
pub use fields::Field;
pub use money::{format_money, parse_money};
pub use precontract::Precontract;
