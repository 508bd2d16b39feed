//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use dodcon_corpus::CorpusConfig;
use dodcon_extractor::PipelineConfig;
use dodcon_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data root holding `clean/`, `blackbox/`, `annotated/` and `corpus/`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Gatekeeper rules
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Pipeline behavior
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Corpus builder settings
    #[serde(default)]
    pub corpus: CorpusConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".dodcon").join("config.toml"))
    }

    /// Resolve an explicit path, falling back to the default one.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::path(),
        }
    }

    /// Load configuration from file, or the defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.validation
            .validate()
            .map_err(|e| CliError::Config(format!("validation: {}", e)))?;
        self.pipeline
            .validate()
            .map_err(|e| CliError::Config(format!("pipeline: {}", e)))?;
        self.corpus
            .validate()
            .map_err(|e| CliError::Config(format!("corpus: {}", e)))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            settings: Settings::default(),
            validation: ValidationConfig::default(),
            pipeline: PipelineConfig::default(),
            corpus: CorpusConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use dodcon_extractor::EmptyBatchPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.data_dir = PathBuf::from("/srv/dodcon");
        config.pipeline.empty_batch_policy = EmptyBatchPolicy::WriteEmpty;
        config.validation = ValidationConfig::strict();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data_dir = \"elsewhere\"\n\n[pipeline]\njobs = 4\n\n[validation]\nreject_empty_values = false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.pipeline.jobs, 4);
        assert!(!config.validation.reject_empty_values);
        assert_eq!(config.validation.min_contract_id_length, 13);
        assert_eq!(
            config.validation.denylist,
            ValidationConfig::default().denylist
        );
    }

    #[test]
    fn test_invalid_section_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pipeline]\njobs = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }
}
