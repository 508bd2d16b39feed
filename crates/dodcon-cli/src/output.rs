//! Output formatting for the CLI.

use crate::commands::check::CheckOutcome;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use dodcon_corpus::{CorpusReport, CorpusSplit};
use dodcon_extractor::{BatchReport, RunReport};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of a directory run.
    pub fn format_run_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_run_table(report)),
            OutputFormat::Quiet => Ok(report
                .batches
                .iter()
                .filter_map(|b| b.artifact.as_ref())
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_run_table(&self, report: &RunReport) -> String {
        if report.batches.is_empty() {
            return self.colorize("No annotation batches found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Batch", "Records", "Accepted", "Rejected", "Result"]);

        for batch in &report.batches {
            builder.push_record([
                batch.batch.clone(),
                batch.total.to_string(),
                batch.accepted.to_string(),
                rejected_summary(batch),
                self.batch_result(batch),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let summary = format!(
            "{}/{} records accepted, {} artifact(s) written",
            report.total_accepted(),
            report.total_records(),
            report.artifacts_written()
        );
        let summary = if report.failed_batches() > 0 {
            self.warning(&format!("{}, {} batch(es) failed", summary, report.failed_batches()))
        } else {
            self.success(&summary)
        };

        format!("{}\n{}", table, summary)
    }

    fn batch_result(&self, batch: &BatchReport) -> String {
        if let Some(error) = &batch.error {
            return self.error(error);
        }
        match batch.artifact.as_ref().and_then(|p| p.file_name()) {
            Some(name) => name.to_string_lossy().into_owned(),
            None => "no artifact".to_string(),
        }
    }

    /// Format check verdicts.
    pub fn format_check_results(&self, outcomes: &[CheckOutcome]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcomes)?),
            OutputFormat::Quiet => Ok(outcomes
                .iter()
                .map(|o| if o.accepted { "accepted" } else { "rejected" })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if outcomes.is_empty() {
                    return Ok(self.colorize("No annotation lines given.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Line", "Verdict", "Kind", "Reason"]);
                for outcome in outcomes {
                    let verdict = if outcome.accepted {
                        self.colorize("accepted", "green")
                    } else {
                        self.colorize("rejected", "red")
                    };
                    builder.push_record([
                        outcome.line.to_string(),
                        verdict,
                        outcome.kind.clone().unwrap_or_default(),
                        outcome.reason.clone().unwrap_or_default(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format the result of a corpus build.
    pub fn format_corpus(&self, report: &CorpusReport, split: &CorpusSplit) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "examples": report.examples.len(),
                "entities": report.entity_count(),
                "empty_texts": report.empty_texts,
                "missing_by_label": report.missing_by_label,
                "overlaps_dropped": report.overlaps_dropped,
                "split": split,
            }))?),
            OutputFormat::Quiet => Ok(format!(
                "{}\n{}",
                split.train_path.display(),
                split.test_path.display()
            )),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Label", "Not found"]);
                for (label, count) in &report.missing_by_label {
                    builder.push_record([label.clone(), count.to_string()]);
                }

                let mut lines = vec![self.success(&format!(
                    "{} examples with {} entities: {} train, {} test",
                    report.examples.len(),
                    report.entity_count(),
                    split.train,
                    split.test
                ))];
                if !report.missing_by_label.is_empty() {
                    let mut table = builder.build();
                    table.with(Style::rounded());
                    lines.push(table.to_string());
                }
                if report.overlaps_dropped > 0 {
                    lines.push(self.warning(&format!(
                        "{} overlapping entities dropped",
                        report.overlaps_dropped
                    )));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn rejected_summary(batch: &BatchReport) -> String {
    if batch.rejected_by_kind.is_empty() {
        return "0".to_string();
    }
    let kinds: Vec<String> = batch
        .rejected_by_kind
        .iter()
        .map(|(kind, count)| format!("{} {}", count, kind))
        .collect();
    format!("{} ({})", batch.rejected(), kinds.join(", "))
}
