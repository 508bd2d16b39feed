//! Merge validated annotations with their source precontract

use crate::error::ExtractorError;
use dodcon_domain::{parse_date, parse_money, Contract, Precontract};
use dodcon_gatekeeper::ValidatedCandidate;
use tracing::error;

/// Build a Contract from a validated candidate and its precontract
///
/// Branch, source reference, announcement date and raw text always come
/// from the precontract. The candidate has already passed the gatekeeper, so
/// a parse failure here is an internal inconsistency, not a rejection.
pub fn reconcile(
    candidate: &ValidatedCandidate,
    source: &Precontract,
) -> Result<Contract, ExtractorError> {
    let contract_amount = parse_money(candidate.contract_amount()).ok_or_else(|| {
        inconsistency(format!(
            "validated contract_amount {:?} for {} does not parse",
            candidate.contract_amount(),
            candidate.contract_id()
        ))
    })?;

    let estimated_completion_date = parse_date(candidate.estimated_completion_date())
        .ok_or_else(|| {
            inconsistency(format!(
                "validated estimated_completion_date {:?} for {} does not parse",
                candidate.estimated_completion_date(),
                candidate.contract_id()
            ))
        })?;

    Ok(Contract {
        contract_id: candidate.contract_id().to_string(),
        federal_agency: candidate.federal_agency().to_string(),
        military_branch: source.military_branch.clone(),
        contract_amount,
        company_name: candidate.company_name().to_string(),
        location: candidate.location().to_string(),
        contract_description: candidate.contract_description().to_string(),
        estimated_completion_date,
        funds_obligated: candidate.funds_obligated().to_string(),
        source_reference: source.source_reference.clone(),
        announcement_date: source.announcement_date,
        raw_text: source.raw_text.clone(),
    })
}

fn inconsistency(message: String) -> ExtractorError {
    error!("{}", message);
    ExtractorError::Inconsistency(message)
}
