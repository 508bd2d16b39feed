//! Configuration for the pipeline

use serde::{Deserialize, Serialize};

/// What to do with a batch in which no record survives validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyBatchPolicy {
    /// Write nothing; log a low-severity diagnostic
    #[default]
    Suppress,
    /// Write an empty artifact named after the batch file
    WriteEmpty,
}

/// Configuration for the Pipeline and Runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Behavior for batches with zero surviving contracts
    #[serde(default)]
    pub empty_batch_policy: EmptyBatchPolicy,

    /// Stop the directory pass at the first batch-level error
    #[serde(default)]
    pub fail_fast: bool,

    /// Independent batches processed at once by the CLI worker pool
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Strip Markdown code fences around annotation JSON
    #[serde(default = "default_true")]
    pub strip_code_fences: bool,
}

fn default_jobs() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Default for PipelineConfig {
    /// Sequential, suppress empty artifacts, keep going on batch errors
    fn default() -> Self {
        Self {
            empty_batch_policy: EmptyBatchPolicy::Suppress,
            fail_fast: false,
            jobs: default_jobs(),
            strip_code_fences: true,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jobs == 0 {
            return Err("jobs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
