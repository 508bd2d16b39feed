//! dodcon CLI - Validate annotated contract announcements and build the NER corpus.

use clap::Parser;
use dodcon_cli::commands;
use dodcon_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> dodcon_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Load config, falling back to defaults when the file does not exist
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Process(args) => commands::execute_process(args, &config, &formatter).await,
        Command::Check(args) => commands::execute_check(args, &config, &formatter).await,
        Command::Corpus(args) => commands::execute_corpus(args, &config, &formatter).await,
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await
        }
    }
}

/// Log to stderr so stdout stays parseable; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
