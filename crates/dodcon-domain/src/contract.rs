//! Contract module - validated, reconciled output records

use crate::Field;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated, typed contract award
///
/// Every field is populated; there is no partial Contract. Dates serialize
/// as ISO-8601 calendar dates ("2034-04-16").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract identifier (at least 13 characters)
    pub contract_id: String,

    /// Awarding agency
    pub federal_agency: String,

    /// Carried from the precontract, never inferred
    pub military_branch: String,

    /// Award amount in dollars
    pub contract_amount: f64,

    /// Awardee
    pub company_name: String,

    /// Location of the awardee or the work
    pub location: String,

    /// Description of the work
    pub contract_description: String,

    /// Parsed completion date
    pub estimated_completion_date: NaiveDate,

    /// Funds obligated at award, as free text
    pub funds_obligated: String,

    /// Carried from the precontract
    pub source_reference: String,

    /// Carried from the precontract
    pub announcement_date: NaiveDate,

    /// Carried from the precontract; the NER corpus is built from it
    pub raw_text: String,
}

impl Contract {
    /// Text value of an annotated field as the annotator would have written it
    ///
    /// Amounts and dates are not rendered here; see `dodcon_domain::format_money`
    /// and `dodcon_domain::format_long_date`.
    pub fn text_field(&self, field: Field) -> Option<&str> {
        match field {
            Field::ContractId => Some(&self.contract_id),
            Field::FederalAgency => Some(&self.federal_agency),
            Field::CompanyName => Some(&self.company_name),
            Field::Location => Some(&self.location),
            Field::ContractDescription => Some(&self.contract_description),
            Field::FundsObligated => Some(&self.funds_obligated),
            Field::ContractAmount | Field::EstimatedCompletionDate => None,
        }
    }
}
