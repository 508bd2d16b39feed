//! Directory pass tests against a temporary batch store

use chrono::NaiveDate;
use dodcon_domain::Precontract;
use dodcon_extractor::{EmptyBatchPolicy, ExtractorError, Pipeline, PipelineConfig, Runner};
use dodcon_gatekeeper::Gatekeeper;
use dodcon_store::{BatchId, BatchStore};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn precontract(article: u32) -> Precontract {
    Precontract::new(
        "Air Force",
        format!("https://www.defense.gov/News/Contracts/Contract/Article/{}/", article),
        "Lockheed Martin Rotary and Mission Systems, Owego, New York, was awarded a contract.",
        NaiveDate::from_ymd_opt(2024, 4, 17).unwrap(),
    )
}

fn good_line() -> String {
    json!({
        "contract_id": "FA8119-24-D-0008",
        "federal_agency": "Air Force Sustainment Center",
        "contract_amount": "$88,380,255",
        "company_name": "Lockheed Martin",
        "location": "Owego, New York",
        "contract_description": "overhaul contract",
        "estimated_completion_date": "April 16, 2034",
        "funds_obligated": "No funds are being obligated at time of award"
    })
    .to_string()
}

fn runner_with(dir: &TempDir, config: PipelineConfig) -> Runner {
    let store = BatchStore::open(dir.path()).unwrap();
    Runner::new(Pipeline::new(Gatekeeper::default_config(), config), store)
}

fn seed_batch(store: &BatchStore, name: &str, articles: &[u32], lines: &[String]) -> BatchId {
    let batch = BatchId::new(name);
    let precontracts: Vec<Precontract> = articles.iter().map(|a| precontract(*a)).collect();
    store.save_precontracts(&batch, &precontracts).unwrap();
    store.write_annotation_lines(&batch, lines).unwrap();
    batch
}

#[test]
fn test_run_writes_artifact_named_after_first_contract() {
    let dir = TempDir::new().unwrap();
    let runner = runner_with(&dir, PipelineConfig::default());
    seed_batch(
        runner.store(),
        "2024-04-17.json",
        &[3691213, 3691214],
        &[good_line(), "not json".to_string()],
    );

    let report = runner.run().unwrap();

    assert_eq!(report.batches.len(), 1);
    assert_eq!(report.total_records(), 2);
    assert_eq!(report.total_accepted(), 1);
    assert_eq!(report.batches[0].rejected(), 1);

    let artifact = report.batches[0].artifact.clone().unwrap();
    assert_eq!(
        artifact.file_name().unwrap().to_str().unwrap(),
        "2024-04-17_3691213.json"
    );
    let contracts = runner.store().load_contracts().unwrap();
    assert_eq!(contracts.len(), 1);
    assert_eq!(contracts[0].contract_amount, 88_380_255.0);
}

#[test]
fn test_empty_batch_suppressed_by_default() {
    let dir = TempDir::new().unwrap();
    let runner = runner_with(&dir, PipelineConfig::default());
    seed_batch(runner.store(), "batch_a.json", &[1], &["[]".to_string()]);

    let report = runner.run().unwrap();

    assert_eq!(report.artifacts_written(), 0);
    assert_eq!(fs::read_dir(runner.store().annotated_dir()).unwrap().count(), 0);
}

#[test]
fn test_empty_batch_written_when_configured() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        empty_batch_policy: EmptyBatchPolicy::WriteEmpty,
        ..PipelineConfig::default()
    };
    let runner = runner_with(&dir, config);
    seed_batch(runner.store(), "batch_a.json", &[1], &["[]".to_string()]);

    let report = runner.run().unwrap();

    let artifact = report.batches[0].artifact.clone().unwrap();
    assert_eq!(artifact.file_name().unwrap().to_str().unwrap(), "batch_a.json");
    let contents: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(artifact).unwrap()).unwrap();
    assert_eq!(contents, json!([]));
}

#[test]
fn test_misaligned_batch_reported_and_others_continue() {
    let dir = TempDir::new().unwrap();
    let runner = runner_with(&dir, PipelineConfig::default());
    seed_batch(runner.store(), "a.json", &[1, 2], &[good_line()]);
    seed_batch(runner.store(), "b.json", &[3], &[good_line()]);

    let report = runner.run().unwrap();

    assert_eq!(report.batches.len(), 2);
    assert_eq!(report.failed_batches(), 1);
    assert!(report.batches[0].error.as_ref().unwrap().contains("Misaligned"));
    assert_eq!(report.batches[1].accepted, 1);
}

#[test]
fn test_fail_fast_stops_on_batch_error() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        fail_fast: true,
        ..PipelineConfig::default()
    };
    let runner = runner_with(&dir, config);
    seed_batch(runner.store(), "a.json", &[1, 2], &[good_line()]);
    seed_batch(runner.store(), "b.json", &[3], &[good_line()]);

    let result = runner.run();

    assert!(matches!(result, Err(ExtractorError::Misaligned { .. })));
    assert_eq!(runner.store().load_contracts().unwrap().len(), 0);
}

#[test]
fn test_missing_precontracts_is_batch_error() {
    let dir = TempDir::new().unwrap();
    let runner = runner_with(&dir, PipelineConfig::default());
    runner
        .store()
        .write_annotation_lines(&BatchId::new("orphan.json"), &[good_line()])
        .unwrap();

    let report = runner.run().unwrap();

    assert_eq!(report.failed_batches(), 1);
    assert_eq!(report.total_accepted(), 0);
}

#[test]
fn test_empty_last_response_is_dropped_alone() {
    let dir = TempDir::new().unwrap();
    let runner = runner_with(&dir, PipelineConfig::default());
    seed_batch(
        runner.store(),
        "2024-04-17.json",
        &[3691213, 3691214],
        &[good_line(), String::new()],
    );

    let report = runner.run().unwrap();

    assert_eq!(report.failed_batches(), 0);
    assert_eq!(report.total_records(), 2);
    assert_eq!(report.total_accepted(), 1);
    assert_eq!(report.batches[0].rejected_by_kind.get("malformed"), Some(&1));
}
