//! dodcon Extractor
//!
//! Turns annotator output into validated, typed contracts.
//!
//! # Overview
//!
//! An external annotator reads each precontract of a batch and writes one
//! response per line to `blackbox/`. The Extractor pairs line N with
//! precontract N, parses the line, runs it through the Gatekeeper and
//! reconciles the survivors with their source precontract. Records that fail
//! any step are dropped and reported; they never abort the batch.
//!
//! # Architecture
//!
//! ```text
//! clean/ + blackbox/ → Parser → Gatekeeper → Reconciler → annotated/
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use dodcon_extractor::{Pipeline, Runner};
//! use dodcon_store::BatchStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = BatchStore::open("data")?;
//! let runner = Runner::new(Pipeline::default_config(), store);
//!
//! let report = runner.run()?;
//! println!("Accepted: {}/{}", report.total_accepted(), report.total_records());
//! println!("Artifacts: {}", report.artifacts_written());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod parser;
mod reconcile;
mod pipeline;
mod runner;


pub use error::ExtractorError;
pub use config::{EmptyBatchPolicy, PipelineConfig};
pub use types::{
    BatchMetadata, BatchOutcome, BatchReport, FailureReason, RecordFailure, RunReport,
};
pub use parser::parse_annotation_line;
pub use reconcile::reconcile;
pub use pipeline::Pipeline;
pub use runner::Runner;
