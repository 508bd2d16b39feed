//! Build NER training examples from validated contracts

use crate::config::CorpusConfig;
use crate::error::CorpusError;
use crate::spans::{clean_text, locate_span, recompute_offsets, EntitySpan, TrainingExample};
use crate::split::split;
use dodcon_domain::{format_long_date, format_long_date_unpadded, format_money, Contract, Field};
use dodcon_store::BatchStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Examples built from a set of contracts, plus what could not be labelled
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusReport {
    /// One example per contract with usable text
    pub examples: Vec<TrainingExample>,

    /// Contracts skipped because their text was empty
    pub empty_texts: usize,

    /// Field values not found in their text, per label
    pub missing_by_label: BTreeMap<String, usize>,

    /// Entities dropped because they overlapped an earlier, longer one
    pub overlaps_dropped: usize,
}

impl CorpusReport {
    /// Total entities across all examples
    pub fn entity_count(&self) -> usize {
        self.examples.iter().map(|e| e.entities.len()).sum()
    }

    /// Total field values that were not found
    pub fn missing_count(&self) -> usize {
        self.missing_by_label.values().sum()
    }
}

/// Where a written corpus went
#[derive(Debug, Clone, Serialize)]
pub struct CorpusSplit {
    /// Training examples written
    pub train: usize,

    /// Test examples written
    pub test: usize,

    /// Training file
    pub train_path: PathBuf,

    /// Test file
    pub test_path: PathBuf,
}

/// Builds the NER corpus
#[derive(Debug, Clone, Default)]
pub struct CorpusBuilder {
    config: CorpusConfig,
}

impl CorpusBuilder {
    /// Create a new CorpusBuilder
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    /// Create a CorpusBuilder after checking its configuration
    pub fn try_new(config: CorpusConfig) -> Result<Self, CorpusError> {
        config.validate().map_err(CorpusError::Config)?;
        Ok(Self::new(config))
    }

    /// Active configuration
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Build one example per contract
    pub fn build(&self, contracts: &[Contract]) -> CorpusReport {
        let mut report = CorpusReport::default();

        for contract in contracts {
            let text = clean_text(&contract.raw_text);
            if text.is_empty() {
                debug!("Skipping contract {} with empty text", contract.contract_id);
                report.empty_texts += 1;
                continue;
            }

            let mut found = Vec::new();
            for field in Field::ALL {
                let label = field.label();
                match surface_forms(contract, field)
                    .iter()
                    .find_map(|form| locate_span(&text, form, &label))
                {
                    Some(span) => found.push(span),
                    None => {
                        debug!("{} not found in text of {}", label, contract.contract_id);
                        *report.missing_by_label.entry(label).or_insert(0) += 1;
                    }
                }
            }

            let (entities, dropped) = resolve_overlaps(found);
            report.overlaps_dropped += dropped;
            report.examples.push(TrainingExample { text, entities });
        }

        info!(
            "Built {} examples with {} entities ({} values not found, {} overlaps dropped)",
            report.examples.len(),
            report.entity_count(),
            report.missing_count(),
            report.overlaps_dropped
        );
        report
    }

    /// Split examples and write the train and test files
    pub fn write(
        &self,
        store: &BatchStore,
        examples: Vec<TrainingExample>,
    ) -> Result<CorpusSplit, CorpusError> {
        let (train, test) = split(examples, self.config.test_fraction, self.config.seed)?;

        let train_path = store.write_corpus_file(&self.config.train_file, &train)?;
        let test_path = store.write_corpus_file(&self.config.test_file, &test)?;
        info!(
            "Wrote {} training and {} test examples to {}",
            train.len(),
            test.len(),
            store.corpus_dir().display()
        );

        Ok(CorpusSplit {
            train: train.len(),
            test: test.len(),
            train_path,
            test_path,
        })
    }

    /// Build from every artifact in `annotated/` and write the split
    pub fn run(&self, store: &BatchStore) -> Result<(CorpusReport, CorpusSplit), CorpusError> {
        let contracts = store.load_contracts()?;
        if contracts.is_empty() {
            warn!("No contracts found in {}", store.annotated_dir().display());
        }

        let report = self.build(&contracts);
        let written = self.write(store, report.examples.clone())?;
        Ok((report, written))
    }

    /// Recompute entity offsets in a corpus file after manual edits
    ///
    /// Returns the number of entities removed because their value no longer
    /// occurs in the text.
    pub fn recompute_file(&self, store: &BatchStore, file_name: &str) -> Result<usize, CorpusError> {
        let mut examples: Vec<TrainingExample> =
            serde_json::from_value(store.read_corpus_file(file_name)?)?;

        let removed: usize = examples.iter_mut().map(recompute_offsets).sum();
        store.write_corpus_file(file_name, &examples)?;

        if removed > 0 {
            warn!("Removed {} stale entities from {}", removed, file_name);
        }
        Ok(removed)
    }
}

/// Text forms a field's value may take in the announcement
fn surface_forms(contract: &Contract, field: Field) -> Vec<String> {
    match field {
        Field::ContractAmount => vec![format_money(contract.contract_amount)],
        Field::EstimatedCompletionDate => vec![
            format_long_date(contract.estimated_completion_date),
            format_long_date_unpadded(contract.estimated_completion_date),
        ],
        _ => contract
            .text_field(field)
            .map(|value| vec![value.to_string()])
            .unwrap_or_default(),
    }
}

/// Keep non-overlapping spans, preferring earlier then longer ones
fn resolve_overlaps(mut spans: Vec<EntitySpan>) -> (Vec<EntitySpan>, usize) {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));

    let mut kept: Vec<EntitySpan> = Vec::with_capacity(spans.len());
    let mut dropped = 0;
    for span in spans {
        if kept.iter().any(|k| k.overlaps(&span)) {
            debug!("Dropping {} span {:?}: overlaps a kept entity", span.label, span.value);
            dropped += 1;
        } else {
            kept.push(span);
        }
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, label: &str) -> EntitySpan {
        EntitySpan {
            start,
            end,
            label: label.to_string(),
            value: "x".repeat(end - start),
        }
    }

    #[test]
    fn test_resolve_overlaps_prefers_earlier() {
        let (kept, dropped) = resolve_overlaps(vec![span(5, 12, "B"), span(0, 8, "A")]);
        assert_eq!(dropped, 1);
        assert_eq!(kept, vec![span(0, 8, "A")]);
    }

    #[test]
    fn test_resolve_overlaps_prefers_longer_at_same_start() {
        let (kept, dropped) = resolve_overlaps(vec![span(0, 4, "SHORT"), span(0, 9, "LONG")]);
        assert_eq!(dropped, 1);
        assert_eq!(kept[0].label, "LONG");
    }

    #[test]
    fn test_resolve_overlaps_keeps_disjoint() {
        let (kept, dropped) = resolve_overlaps(vec![span(10, 12, "B"), span(0, 10, "A")]);
        assert_eq!(dropped, 0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].label, "A");
    }
}
