//! Annotation validation logic

use crate::{GatekeeperError, ValidationConfig};
use dodcon_domain::{parse_date, AnnotationCandidate, Field};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Result of validating one annotator response
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the response passed validation
    pub status: ValidationStatus,

    /// First failed check (if any)
    pub reason: Option<RejectionReason>,

    /// The promoted candidate (if accepted)
    pub candidate: Option<ValidatedCandidate>,
}

impl ValidationResult {
    fn accepted(candidate: ValidatedCandidate) -> Self {
        Self {
            status: ValidationStatus::Accepted,
            reason: None,
            candidate: Some(candidate),
        }
    }

    fn rejected(reason: RejectionReason) -> Self {
        Self {
            status: ValidationStatus::Rejected,
            reason: Some(reason),
            candidate: None,
        }
    }

    /// Check whether the response was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// Take the validated candidate, or the reason it was rejected
    pub fn into_candidate(self) -> Result<ValidatedCandidate, RejectionReason> {
        match (self.candidate, self.reason) {
            (Some(candidate), _) => Ok(candidate),
            (None, Some(reason)) => Err(reason),
            (None, None) => Err(RejectionReason::MalformedCandidate(
                "validation produced no outcome".to_string(),
            )),
        }
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Response accepted
    Accepted,

    /// Response rejected
    Rejected,
}

/// Reasons for rejection, one per check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    /// Not a JSON object at all
    #[error("malformed candidate: {0}")]
    MalformedCandidate(String),

    /// Key set differs from the schema
    #[error("schema violation: missing {missing:?}, extra {extra:?}")]
    SchemaViolation {
        /// Schema keys absent from the candidate
        missing: Vec<String>,
        /// Keys not in the schema
        extra: Vec<String>,
    },

    /// A field is not a string
    #[error("field '{field}' is {found}, expected string")]
    TypeViolation {
        /// Offending field
        field: Field,
        /// JSON type found instead
        found: &'static str,
    },

    /// Contract id too short to be a real identifier
    #[error("contract_id {value:?} has {length} characters (minimum {minimum})")]
    ContractIdTooShort {
        /// The id as given
        value: String,
        /// Its length in characters
        length: usize,
        /// Configured minimum
        minimum: usize,
    },

    /// A field holds placeholder text or is empty
    #[error("field '{field}' holds placeholder {placeholder:?}: {value:?}")]
    PlaceholderValue {
        /// Offending field
        field: Field,
        /// The field value
        value: String,
        /// The denylist entry it matched (empty for an empty value)
        placeholder: String,
    },

    /// Contract amount lacks the currency marker
    #[error("contract_amount {value:?} has no currency marker")]
    MissingCurrencyMarker {
        /// The amount as given
        value: String,
    },

    /// Completion date is not in a recognized shape
    #[error("estimated_completion_date {value:?} is not a recognized date")]
    UnparseableDate {
        /// The date as given
        value: String,
    },
}

impl RejectionReason {
    /// Short, stable name of the failed check (for counting and reports)
    pub fn kind(&self) -> &'static str {
        match self {
            RejectionReason::MalformedCandidate(_) => "malformed",
            RejectionReason::SchemaViolation { .. } => "schema",
            RejectionReason::TypeViolation { .. } => "type",
            RejectionReason::ContractIdTooShort { .. } => "contract_id",
            RejectionReason::PlaceholderValue { .. } => "placeholder",
            RejectionReason::MissingCurrencyMarker { .. } => "currency",
            RejectionReason::UnparseableDate { .. } => "date",
        }
    }
}

/// An annotator response that passed every check
///
/// Only the Gatekeeper constructs these. All eight fields are guaranteed to
/// be present, strings, and free of placeholders, and the completion date is
/// known to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCandidate {
    contract_id: String,
    federal_agency: String,
    contract_amount: String,
    company_name: String,
    location: String,
    contract_description: String,
    estimated_completion_date: String,
    funds_obligated: String,
}

impl ValidatedCandidate {
    /// Get any field by name
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ContractId => &self.contract_id,
            Field::FederalAgency => &self.federal_agency,
            Field::ContractAmount => &self.contract_amount,
            Field::CompanyName => &self.company_name,
            Field::Location => &self.location,
            Field::ContractDescription => &self.contract_description,
            Field::EstimatedCompletionDate => &self.estimated_completion_date,
            Field::FundsObligated => &self.funds_obligated,
        }
    }

    /// Contract identifier
    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// Awarding agency
    pub fn federal_agency(&self) -> &str {
        &self.federal_agency
    }

    /// Amount as currency text
    pub fn contract_amount(&self) -> &str {
        &self.contract_amount
    }

    /// Awardee
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Location
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Description of the work
    pub fn contract_description(&self) -> &str {
        &self.contract_description
    }

    /// Completion date as free text
    pub fn estimated_completion_date(&self) -> &str {
        &self.estimated_completion_date
    }

    /// Funds obligated, free text
    pub fn funds_obligated(&self) -> &str {
        &self.funds_obligated
    }
}

/// The Gatekeeper validates annotator responses before reconciliation
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper after checking the configuration
    pub fn try_new(config: ValidationConfig) -> Result<Self, GatekeeperError> {
        config.validate().map_err(GatekeeperError::Config)?;
        Ok(Self::new(config))
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a parsed annotator response
    ///
    /// Checks run in order and stop at the first failure.
    pub fn validate(&self, raw: &Value) -> ValidationResult {
        // 1. JSON object
        let Some(candidate) = AnnotationCandidate::from_value(raw.clone()) else {
            return self.reject(RejectionReason::MalformedCandidate(format!(
                "expected a JSON object, found {}",
                json_type(raw)
            )));
        };
        self.validate_candidate(&candidate)
    }

    /// Validate a response that is already known to be an object
    pub fn validate_candidate(&self, candidate: &AnnotationCandidate) -> ValidationResult {
        match self.check(candidate) {
            Ok(validated) => ValidationResult::accepted(validated),
            Err(reason) => self.reject(reason),
        }
    }

    /// Binary verdict, discarding the reason
    pub fn is_valid(&self, raw: &Value) -> bool {
        self.validate(raw).is_accepted()
    }

    fn reject(&self, reason: RejectionReason) -> ValidationResult {
        debug!("Rejected candidate ({}): {}", reason.kind(), reason);
        ValidationResult::rejected(reason)
    }

    fn check(&self, candidate: &AnnotationCandidate) -> Result<ValidatedCandidate, RejectionReason> {
        // 2. Exact key set
        self.check_schema(candidate)?;

        // 3. Every field is a string
        for field in Field::ALL {
            match candidate.get(field.as_str()) {
                Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(RejectionReason::TypeViolation {
                        field,
                        found: json_type(other),
                    })
                }
                None => {
                    return Err(RejectionReason::SchemaViolation {
                        missing: vec![field.as_str().to_string()],
                        extra: Vec::new(),
                    })
                }
            }
        }
        let get = |field: Field| candidate.get_str(field).unwrap_or_default();

        // 4. Contract id length
        let contract_id = get(Field::ContractId);
        let length = contract_id.chars().count();
        if length < self.config.min_contract_id_length {
            return Err(RejectionReason::ContractIdTooShort {
                value: contract_id.to_string(),
                length,
                minimum: self.config.min_contract_id_length,
            });
        }

        // 5. Placeholders
        for field in Field::ALL {
            if self.config.checks_placeholders(field) {
                self.check_placeholder(field, get(field))?;
            }
        }

        // 6. Currency marker
        let amount = get(Field::ContractAmount);
        if !amount.contains(self.config.currency_marker) {
            return Err(RejectionReason::MissingCurrencyMarker {
                value: amount.to_string(),
            });
        }

        // 7. Completion date
        let completion = get(Field::EstimatedCompletionDate);
        if parse_date(completion).is_none() {
            return Err(RejectionReason::UnparseableDate {
                value: completion.to_string(),
            });
        }

        Ok(ValidatedCandidate {
            contract_id: contract_id.to_string(),
            federal_agency: get(Field::FederalAgency).to_string(),
            contract_amount: amount.to_string(),
            company_name: get(Field::CompanyName).to_string(),
            location: get(Field::Location).to_string(),
            contract_description: get(Field::ContractDescription).to_string(),
            estimated_completion_date: completion.to_string(),
            funds_obligated: get(Field::FundsObligated).to_string(),
        })
    }

    fn check_schema(&self, candidate: &AnnotationCandidate) -> Result<(), RejectionReason> {
        let missing: Vec<String> = Field::ALL
            .iter()
            .filter(|f| !candidate.contains_key(f.as_str()))
            .map(|f| f.as_str().to_string())
            .collect();
        let extra: Vec<String> = candidate
            .keys()
            .filter(|k| Field::parse(k).is_none())
            .map(str::to_string)
            .collect();

        if missing.is_empty() && extra.is_empty() {
            Ok(())
        } else {
            Err(RejectionReason::SchemaViolation { missing, extra })
        }
    }

    fn check_placeholder(&self, field: Field, value: &str) -> Result<(), RejectionReason> {
        if self.config.reject_empty_values && value.is_empty() {
            return Err(RejectionReason::PlaceholderValue {
                field,
                value: String::new(),
                placeholder: String::new(),
            });
        }

        if let Some(placeholder) = self.config.denylist.iter().find(|p| value.contains(p.as_str())) {
            return Err(RejectionReason::PlaceholderValue {
                field,
                value: value.to_string(),
                placeholder: placeholder.clone(),
            });
        }

        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
