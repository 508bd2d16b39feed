//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// dodcon - Turn annotated defense contract announcements into validated records.
#[derive(Debug, Parser)]
#[command(name = "dodcon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DODCON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (paths and verdicts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate every annotation batch and write contract artifacts
    Process(ProcessArgs),

    /// Validate annotation lines without writing anything
    Check(CheckArgs),

    /// Build the NER training corpus from contract artifacts
    Corpus(CorpusArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Data root (overrides the configured one)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Batches processed at once
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Write an empty artifact for batches with no surviving records
    #[arg(long)]
    pub write_empty: bool,

    /// Stop at the first batch that cannot be processed
    #[arg(long)]
    pub fail_fast: bool,

    /// Validation rule preset (overrides the configured rules)
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// A single annotation line
    pub line: Option<String>,

    /// File of annotation lines, one per line
    #[arg(long, conflicts_with = "line")]
    pub file: Option<PathBuf>,

    /// Validation rule preset (overrides the configured rules)
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// Arguments for the corpus command.
#[derive(Debug, Parser)]
pub struct CorpusArgs {
    /// Data root (overrides the configured one)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Share of examples held out for testing
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// Seed for the train/test shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Recompute entity offsets in a hand-edited corpus file instead of building
    #[arg(long, value_name = "FILE")]
    pub recompute: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Validation rule presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// The standard rules
    Default,
    /// Longer minimum id and extra placeholders
    Strict,
    /// Schema, type, currency and date checks only
    Permissive,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for dodcon_gatekeeper::ValidationConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => dodcon_gatekeeper::ValidationConfig::default(),
            PresetArg::Strict => dodcon_gatekeeper::ValidationConfig::strict(),
            PresetArg::Permissive => dodcon_gatekeeper::ValidationConfig::permissive(),
        }
    }
}
