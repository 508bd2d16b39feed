//! Gatekeeper configuration

use dodcon_domain::Field;
use serde::{Deserialize, Serialize};

/// Placeholders the annotator writes when it could not find a value
const DEFAULT_DENYLIST: [&str; 9] = [
    "To be determined",
    "Not specified",
    "Not provided",
    "n/a",
    "N/a",
    "n/A",
    "N/A",
    "Not applicable",
    "No completion date",
];

/// Extra placeholders rejected by the strict preset
const STRICT_EXTRAS: [&str; 4] = ["Unknown", "TBD", "Not available", "Not disclosed"];

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum contract id length in characters; real ids are never shorter
    #[serde(default = "default_min_contract_id_length")]
    pub min_contract_id_length: usize,

    /// Substrings that mark a field as a placeholder (case-sensitive)
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,

    /// Reject fields that are empty strings
    #[serde(default = "default_true")]
    pub reject_empty_values: bool,

    /// Fields exempt from the placeholder and empty checks
    #[serde(default = "default_exempt_fields")]
    pub placeholder_exempt_fields: Vec<Field>,

    /// Marker `contract_amount` must contain
    #[serde(default = "default_currency_marker")]
    pub currency_marker: char,
}

fn default_min_contract_id_length() -> usize {
    13
}

fn default_denylist() -> Vec<String> {
    DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_exempt_fields() -> Vec<Field> {
    vec![Field::ContractId]
}

fn default_currency_marker() -> char {
    '$'
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_contract_id_length: default_min_contract_id_length(),
            denylist: default_denylist(),
            reject_empty_values: true,
            placeholder_exempt_fields: default_exempt_fields(),
            currency_marker: default_currency_marker(),
        }
    }
}

impl ValidationConfig {
    /// Strict preset: a wider denylist and no exempt fields
    pub fn strict() -> Self {
        let mut config = Self::default();
        config
            .denylist
            .extend(STRICT_EXTRAS.iter().map(|s| s.to_string()));
        config.placeholder_exempt_fields = Vec::new();
        config.min_contract_id_length = 15;
        config
    }

    /// Permissive preset: keeps the schema, type and date checks but only
    /// rejects empty values, with no length gate on contract ids
    pub fn permissive() -> Self {
        Self {
            min_contract_id_length: 0,
            denylist: Vec::new(),
            reject_empty_values: true,
            placeholder_exempt_fields: default_exempt_fields(),
            currency_marker: default_currency_marker(),
        }
    }

    /// Check that a field is subject to the placeholder check
    pub fn checks_placeholders(&self, field: Field) -> bool {
        !self.placeholder_exempt_fields.contains(&field)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(idx) = self.denylist.iter().position(|p| p.is_empty()) {
            return Err(format!(
                "denylist entry {} is empty; use reject_empty_values instead",
                idx
            ));
        }
        if self.currency_marker.is_whitespace() {
            return Err("currency_marker cannot be whitespace".to_string());
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
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.min_contract_id_length, 13);
        assert!(config.denylist.iter().any(|p| p == "N/A"));
        assert!(config.denylist.iter().any(|p| p == "No completion date"));
        assert!(config.reject_empty_values);
        assert!(!config.checks_placeholders(Field::ContractId));
        assert!(config.checks_placeholders(Field::Location));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = ValidationConfig::strict();
        assert!(config.denylist.iter().any(|p| p == "TBD"));
        assert!(config.checks_placeholders(Field::ContractId));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert!(config.denylist.is_empty());
        assert_eq!(config.min_contract_id_length, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_denylist_entry_is_invalid() {
        let mut config = ValidationConfig::default();
        config.denylist.push(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ValidationConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = ValidationConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_toml_defaults_for_optional_keys() {
        let parsed = ValidationConfig::from_toml(
            r#"
            min_contract_id_length = 10
            denylist = ["N/A"]
            "#,
        )
        .unwrap();
        assert_eq!(parsed.min_contract_id_length, 10);
        assert_eq!(parsed.currency_marker, '$');
        assert_eq!(parsed.placeholder_exempt_fields, vec![Field::ContractId]);
    }

    #[test]
    fn test_toml_single_key_keeps_other_defaults() {
        let parsed = ValidationConfig::from_toml("reject_empty_values = false").unwrap();
        let expected = ValidationConfig {
            reject_empty_values: false,
            ..ValidationConfig::default()
        };
        assert_eq!(parsed, expected);

        let parsed = ValidationConfig::from_toml("").unwrap();
        assert_eq!(parsed, ValidationConfig::default());
    }
}
