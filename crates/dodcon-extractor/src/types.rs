//! Result and report types for batch processing

use dodcon_domain::Contract;
use dodcon_gatekeeper::RejectionReason;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Contracts that survived one batch, plus what happened to the rest
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Surviving contracts, in precontract order
    pub contracts: Vec<Contract>,

    /// Records that were dropped
    pub failures: Vec<RecordFailure>,

    /// Metadata about the batch
    pub metadata: BatchMetadata,
}

impl BatchOutcome {
    /// Count dropped records per failure kind
    pub fn failures_by_kind(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.reason.kind().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// A dropped record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    /// Zero-based position in the batch
    pub index: usize,

    /// Why it was dropped
    pub reason: FailureReason,
}

/// Why a record was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The gatekeeper rejected the annotation
    Rejected(RejectionReason),

    /// The annotation passed validation but could not be reconciled
    Inconsistent(String),
}

impl FailureReason {
    /// Short, stable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            FailureReason::Rejected(reason) => reason.kind(),
            FailureReason::Inconsistent(_) => "inconsistency",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Rejected(reason) => write!(f, "{}", reason),
            FailureReason::Inconsistent(message) => write!(f, "internal inconsistency: {}", message),
        }
    }
}

/// Metadata about a processed batch
#[derive(Debug, Clone)]
pub struct BatchMetadata {
    /// Batch name used in diagnostics
    pub batch: String,

    /// Number of records in the batch
    pub total_records: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Per-batch line of a directory run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Batch file name
    pub batch: String,

    /// Records in the batch
    pub total: usize,

    /// Records that became contracts
    pub accepted: usize,

    /// Dropped records per failure kind
    pub rejected_by_kind: BTreeMap<String, usize>,

    /// Artifact written, if any
    pub artifact: Option<PathBuf>,

    /// Batch-level error (missing precontracts, misalignment, I/O)
    pub error: Option<String>,
}

impl BatchReport {
    /// Report for a batch that could not be processed
    pub fn failed(batch: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            batch: batch.into(),
            total: 0,
            accepted: 0,
            rejected_by_kind: BTreeMap::new(),
            artifact: None,
            error: Some(error.to_string()),
        }
    }

    /// Total dropped records
    pub fn rejected(&self) -> usize {
        self.rejected_by_kind.values().sum()
    }
}

/// Result of a directory run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// One entry per batch, in processing order
    pub batches: Vec<BatchReport>,
}

impl RunReport {
    /// Records seen across all batches
    pub fn total_records(&self) -> usize {
        self.batches.iter().map(|b| b.total).sum()
    }

    /// Contracts produced across all batches
    pub fn total_accepted(&self) -> usize {
        self.batches.iter().map(|b| b.accepted).sum()
    }

    /// Artifacts written
    pub fn artifacts_written(&self) -> usize {
        self.batches.iter().filter(|b| b.artifact.is_some()).count()
    }

    /// Batches that failed outright
    pub fn failed_batches(&self) -> usize {
        self.batches.iter().filter(|b| b.error.is_some()).count()
    }
}
