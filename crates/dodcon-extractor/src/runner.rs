//! Directory pass over the batch store

use crate::config::EmptyBatchPolicy;
use crate::error::ExtractorError;
use crate::pipeline::Pipeline;
use crate::types::{BatchReport, RunReport};
use dodcon_store::{BatchId, BatchStore};
use tracing::{debug, error, info};

/// Runs the pipeline over every annotation batch in a store
///
/// Batches are independent: a failing batch is reported and the pass moves
/// on, unless `fail_fast` is set.
#[derive(Debug, Clone)]
pub struct Runner {
    pipeline: Pipeline,
    store: BatchStore,
}

impl Runner {
    /// Create a new Runner
    pub fn new(pipeline: Pipeline, store: BatchStore) -> Self {
        Self { pipeline, store }
    }

    /// Pipeline in use
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Store in use
    pub fn store(&self) -> &BatchStore {
        &self.store
    }

    /// Batches waiting in `blackbox/`
    pub fn batches(&self) -> Result<Vec<BatchId>, ExtractorError> {
        Ok(self.store.list_annotation_batches()?)
    }

    /// Process every batch, in file name order
    pub fn run(&self) -> Result<RunReport, ExtractorError> {
        let batches = self.batches()?;
        info!("Processing {} annotation batches", batches.len());

        let mut report = RunReport::default();
        for batch in &batches {
            match self.run_batch(batch) {
                Ok(batch_report) => report.batches.push(batch_report),
                Err(e) if self.pipeline.config().fail_fast => return Err(e),
                Err(e) => {
                    error!("Batch {} failed: {}", batch, e);
                    report.batches.push(BatchReport::failed(batch.as_str(), &e));
                }
            }
        }

        info!(
            "{}/{} records accepted across {} batches, {} artifacts written",
            report.total_accepted(),
            report.total_records(),
            report.batches.len(),
            report.artifacts_written()
        );
        Ok(report)
    }

    /// Process one batch and write its artifact
    pub fn run_batch(&self, batch: &BatchId) -> Result<BatchReport, ExtractorError> {
        let precontracts = self.store.load_precontracts(batch)?;
        let lines = self.store.load_annotation_lines(batch)?;

        let outcome = self
            .pipeline
            .process_named_batch(batch.as_str(), &precontracts, &lines)?;

        let fallback = match self.pipeline.config().empty_batch_policy {
            EmptyBatchPolicy::WriteEmpty => Some(batch),
            EmptyBatchPolicy::Suppress => None,
        };
        let artifact = self.store.write_contracts(&outcome.contracts, fallback)?;
        if artifact.is_none() {
            debug!("No contracts survived batch {}; nothing written", batch);
        }

        Ok(BatchReport {
            batch: batch.to_string(),
            total: outcome.metadata.total_records,
            accepted: outcome.contracts.len(),
            rejected_by_kind: outcome.failures_by_kind(),
            artifact,
            error: None,
        })
    }
}
