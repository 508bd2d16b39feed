//! Core Pipeline implementation

use crate::config::PipelineConfig;
use crate::error::ExtractorError;
use crate::parser::parse_annotation_line;
use crate::reconcile::reconcile;
use crate::types::{BatchMetadata, BatchOutcome, FailureReason, RecordFailure};
use dodcon_domain::{Contract, Precontract};
use dodcon_gatekeeper::{Gatekeeper, RejectionReason};
use std::time::Instant;
use tracing::{debug, info, warn};

/// The Pipeline turns a batch of precontracts and their annotation lines
/// into contracts
#[derive(Debug, Clone)]
pub struct Pipeline {
    gatekeeper: Gatekeeper,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new Pipeline
    pub fn new(gatekeeper: Gatekeeper, config: PipelineConfig) -> Self {
        Self { gatekeeper, config }
    }

    /// Create a Pipeline after checking its configuration
    pub fn try_new(gatekeeper: Gatekeeper, config: PipelineConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self::new(gatekeeper, config))
    }

    /// Create a Pipeline with default gatekeeper and configuration
    pub fn default_config() -> Self {
        Self::new(Gatekeeper::default_config(), PipelineConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Gatekeeper in use
    pub fn gatekeeper(&self) -> &Gatekeeper {
        &self.gatekeeper
    }

    /// Process one batch
    ///
    /// Line N must be the annotation of precontract N. A length mismatch
    /// means the annotator broke that contract and nothing is processed.
    /// Individual bad records are dropped and reported; they never abort
    /// the batch.
    pub fn process_batch<S: AsRef<str>>(
        &self,
        precontracts: &[Precontract],
        annotation_lines: &[S],
    ) -> Result<BatchOutcome, ExtractorError> {
        self.process_named_batch("<unnamed>", precontracts, annotation_lines)
    }

    /// Process one batch, naming it in diagnostics
    pub fn process_named_batch<S: AsRef<str>>(
        &self,
        batch: &str,
        precontracts: &[Precontract],
        annotation_lines: &[S],
    ) -> Result<BatchOutcome, ExtractorError> {
        if precontracts.len() != annotation_lines.len() {
            return Err(ExtractorError::Misaligned {
                precontracts: precontracts.len(),
                annotations: annotation_lines.len(),
            });
        }

        let start = Instant::now();
        let mut contracts = Vec::new();
        let mut failures = Vec::new();

        for (index, (precontract, line)) in precontracts.iter().zip(annotation_lines).enumerate() {
            match self.process_record(precontract, line.as_ref()) {
                Ok(contract) => contracts.push(contract),
                Err(reason) => {
                    match &reason {
                        FailureReason::Inconsistent(_) => {
                            warn!("Batch {} record {}: {}", batch, index, reason)
                        }
                        FailureReason::Rejected(_) => {
                            debug!("Batch {} record {} dropped: {}", batch, index, reason)
                        }
                    }
                    failures.push(RecordFailure { index, reason });
                }
            }
        }

        info!(
            "{}/{} records in batch {} passed validation",
            contracts.len(),
            precontracts.len(),
            batch
        );

        Ok(BatchOutcome {
            contracts,
            failures,
            metadata: BatchMetadata {
                batch: batch.to_string(),
                total_records: precontracts.len(),
                processing_time_ms: start.elapsed().as_millis() as u64,
            },
        })
    }

    /// Parse, validate and reconcile a single record
    pub fn process_record(
        &self,
        precontract: &Precontract,
        line: &str,
    ) -> Result<Contract, FailureReason> {
        let raw = parse_annotation_line(line, self.config.strip_code_fences).map_err(|e| {
            FailureReason::Rejected(RejectionReason::MalformedCandidate(e.to_string()))
        })?;

        let candidate = self
            .gatekeeper
            .validate(&raw)
            .into_candidate()
            .map_err(FailureReason::Rejected)?;

        reconcile(&candidate, precontract).map_err(|e| FailureReason::Inconsistent(e.to_string()))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn precontract() -> Precontract {
        Precontract::new(
            "Navy",
            "https://www.defense.gov/News/Contracts/Contract/Article/1/",
            "text",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )
    }

    #[test]
    fn test_empty_batch() {
        let pipeline = Pipeline::default_config();
        let lines: Vec<String> = Vec::new();
        let outcome = pipeline.process_batch(&[], &lines).unwrap();
        assert!(outcome.contracts.is_empty());
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.metadata.total_records, 0);
    }

    #[test]
    fn test_misaligned_batch_is_fatal() {
        let pipeline = Pipeline::default_config();
        let result = pipeline.process_batch(&[precontract(), precontract()], &["{}"]);
        assert!(matches!(
            result,
            Err(ExtractorError::Misaligned { precontracts: 2, annotations: 1 })
        ));
    }

    #[test]
    fn test_malformed_line_reason() {
        let pipeline = Pipeline::default_config();
        let reason = pipeline.process_record(&precontract(), "not json").unwrap_err();
        assert_eq!(reason.kind(), "malformed");
    }

    #[test]
    fn test_try_new_rejects_bad_config() {
        let config = PipelineConfig {
            jobs: 0,
            ..PipelineConfig::default()
        };
        assert!(Pipeline::try_new(Gatekeeper::default_config(), config).is_err());
    }
}
