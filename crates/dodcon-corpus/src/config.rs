//! Configuration for the corpus builder

use serde::{Deserialize, Serialize};

/// Configuration for CorpusBuilder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Share of examples held out for testing
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,

    /// Seed for the train/test shuffle
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Training file name under `corpus/`
    #[serde(default = "default_train_file")]
    pub train_file: String,

    /// Test file name under `corpus/`
    #[serde(default = "default_test_file")]
    pub test_file: String,
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_train_file() -> String {
    "train.json".to_string()
}

fn default_test_file() -> String {
    "test.json".to_string()
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            seed: default_seed(),
            train_file: default_train_file(),
            test_file: default_test_file(),
        }
    }
}

impl CorpusConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.test_fraction) {
            return Err("test_fraction must be between 0.0 and 1.0".to_string());
        }
        if self.train_file.is_empty() || self.test_file.is_empty() {
            return Err("corpus file names must not be empty".to_string());
        }
        if self.train_file == self.test_file {
            return Err("train_file and test_file must differ".to_string());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CorpusConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_fraction() {
        let config = CorpusConfig {
            test_fraction: 1.2,
            ..CorpusConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_same_file_names() {
        let config = CorpusConfig {
            test_file: "train.json".to_string(),
            ..CorpusConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CorpusConfig {
            test_fraction: 0.1,
            seed: 7,
            ..CorpusConfig::default()
        };
        let toml_str = config.to_toml().unwrap();
        assert_eq!(CorpusConfig::from_toml(&toml_str).unwrap(), config);
    }
}
