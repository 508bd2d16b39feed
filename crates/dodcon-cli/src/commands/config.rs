//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", formatter.info(&format!("Configuration file: {}", path.display())));
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Init { force } => init_config(path, force, formatter),
    }
}

/// Write the default configuration.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists; use --force to overwrite",
            path.display()
        )));
    }

    Config::default().save_to(path)?;
    println!("{}", formatter.success(&format!("Wrote {}", path.display())));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        init_config(&path, false, &formatter).unwrap();
        assert!(init_config(&path, false, &formatter).is_err());
        assert!(init_config(&path, true, &formatter).is_ok());
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
