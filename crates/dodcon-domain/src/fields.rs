//! Field module - the fixed annotation schema

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight fields the annotator must produce for every precontract
///
/// The schema is closed: a candidate with any other key, or missing any of
/// these, is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Contract identifier, e.g. "FA8119-24-D-0008"
    ContractId,

    /// Awarding agency or contracting activity
    FederalAgency,

    /// Award amount as currency text, e.g. "$88,380,255"
    ContractAmount,

    /// Awardee
    CompanyName,

    /// Place of performance or awardee location
    Location,

    /// Free-text description of the work
    ContractDescription,

    /// Completion date as free text, e.g. "April 16, 2034"
    EstimatedCompletionDate,

    /// Funds obligated at time of award, kept as free text
    FundsObligated,
}

impl Field {
    /// All schema fields in canonical order
    pub const ALL: [Field; 8] = [
        Field::ContractId,
        Field::FederalAgency,
        Field::ContractAmount,
        Field::CompanyName,
        Field::Location,
        Field::ContractDescription,
        Field::EstimatedCompletionDate,
        Field::FundsObligated,
    ];

    /// Get the JSON key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::ContractId => "contract_id",
            Field::FederalAgency => "federal_agency",
            Field::ContractAmount => "contract_amount",
            Field::CompanyName => "company_name",
            Field::Location => "location",
            Field::ContractDescription => "contract_description",
            Field::EstimatedCompletionDate => "estimated_completion_date",
            Field::FundsObligated => "funds_obligated",
        }
    }

    /// Entity label used in the NER corpus (upper-cased key)
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Parse a field from its JSON key
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown field: {}", s))
    }
}
