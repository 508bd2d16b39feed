//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use dodcon_extractor::{BatchReport, EmptyBatchPolicy, Pipeline, RunReport, Runner};
use dodcon_gatekeeper::{Gatekeeper, ValidationConfig};
use dodcon_store::BatchStore;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Execute the process command.
pub async fn execute_process(args: ProcessArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut pipeline_config = config.pipeline.clone();
    if let Some(jobs) = args.jobs {
        pipeline_config.jobs = jobs;
    }
    if args.write_empty {
        pipeline_config.empty_batch_policy = EmptyBatchPolicy::WriteEmpty;
    }
    if args.fail_fast {
        pipeline_config.fail_fast = true;
    }

    let validation: ValidationConfig = match args.preset {
        Some(preset) => preset.into(),
        None => config.validation.clone(),
    };

    let gatekeeper = Gatekeeper::try_new(validation)?;
    let pipeline = Pipeline::try_new(gatekeeper, pipeline_config)?;
    let data_dir = args.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let store = BatchStore::open(&data_dir)?;
    let runner = Runner::new(pipeline, store);

    let report = run_parallel(runner).await?;
    println!("{}", formatter.format_run_report(&report)?);

    match report.failed_batches() {
        0 => Ok(()),
        failed => Err(CliError::BatchesFailed(failed)),
    }
}

/// Run every batch, at most `jobs` at a time
///
/// Each batch runs on the blocking pool; reports come back in batch order.
/// With `fail_fast`, the first batch error cancels batches not yet started
/// and is returned. A single worker hands the whole pass to [`Runner::run`].
pub async fn run_parallel(runner: Runner) -> Result<RunReport> {
    let jobs = runner.pipeline().config().jobs.max(1);
    let fail_fast = runner.pipeline().config().fail_fast;

    if jobs == 1 {
        let report = tokio::task::spawn_blocking(move || runner.run())
            .await
            .map_err(|e| CliError::Task(e.to_string()))??;
        return Ok(report);
    }

    let batches = runner.batches()?;
    info!("Processing {} annotation batches with {} worker(s)", batches.len(), jobs);

    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut tasks = JoinSet::new();

    for (index, batch) in batches.into_iter().enumerate() {
        let runner = runner.clone();
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| CliError::Task(e.to_string()))?;
            let result = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                runner.run_batch(&batch).map_err(|e| (batch, e))
            })
            .await
            .map_err(|e| CliError::Task(e.to_string()))?;
            Ok::<_, CliError>((index, result))
        });
    }

    let mut reports: Vec<(usize, BatchReport)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined.map_err(|e| CliError::Task(e.to_string()))??;
        match result {
            Ok(report) => reports.push((index, report)),
            Err((_, e)) if fail_fast => {
                tasks.abort_all();
                return Err(e.into());
            }
            Err((batch, e)) => {
                error!("Batch {} failed: {}", batch, e);
                reports.push((index, BatchReport::failed(batch.as_str(), &e)));
            }
        }
    }

    reports.sort_by_key(|(index, _)| *index);
    let report = RunReport {
        batches: reports.into_iter().map(|(_, report)| report).collect(),
    };

    info!(
        "{}/{} records accepted across {} batches, {} artifacts written",
        report.total_accepted(),
        report.total_records(),
        report.batches.len(),
        report.artifacts_written()
    );
    Ok(report)
}
