//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use dodcon_extractor::parse_annotation_line;
use dodcon_gatekeeper::{Gatekeeper, RejectionReason, ValidationConfig};
use serde::Serialize;
use std::fs;

/// Verdict for one annotation line.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    /// One-based line number
    pub line: usize,

    /// Whether the line passed every check
    pub accepted: bool,

    /// Rejection kind, if rejected
    pub kind: Option<String>,

    /// Rejection message, if rejected
    pub reason: Option<String>,
}

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let lines: Vec<String> = if let Some(path) = &args.file {
        let contents = fs::read_to_string(path)?;
        contents.lines().map(str::to_string).collect()
    } else if let Some(line) = args.line {
        vec![line]
    } else {
        return Err(CliError::InvalidInput(
            "Must give an annotation line or --file".to_string(),
        ));
    };

    let validation: ValidationConfig = match args.preset {
        Some(preset) => preset.into(),
        None => config.validation.clone(),
    };
    let gatekeeper = Gatekeeper::try_new(validation)?;

    let outcomes = check_lines(&gatekeeper, config.pipeline.strip_code_fences, &lines);
    println!("{}", formatter.format_check_results(&outcomes)?);

    Ok(())
}

/// Parse and validate each line on its own.
///
/// Blank lines are skipped but still counted, so line numbers match the
/// input.
pub fn check_lines<S: AsRef<str>>(
    gatekeeper: &Gatekeeper,
    strip_code_fences: bool,
    lines: &[S],
) -> Vec<CheckOutcome> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.as_ref().trim().is_empty())
        .map(|(index, line)| {
            let verdict = parse_annotation_line(line.as_ref(), strip_code_fences)
                .map_err(|e| RejectionReason::MalformedCandidate(e.to_string()))
                .and_then(|raw| gatekeeper.validate(&raw).into_candidate());

            match verdict {
                Ok(_) => CheckOutcome {
                    line: index + 1,
                    accepted: true,
                    kind: None,
                    reason: None,
                },
                Err(reason) => CheckOutcome {
                    line: index + 1,
                    accepted: false,
                    kind: Some(reason.kind().to_string()),
                    reason: Some(reason.to_string()),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good_line() -> String {
        json!({
            "contract_id": "FA8119-24-D-0008",
            "federal_agency": "Air Force Sustainment Center",
            "contract_amount": "$88,380,255",
            "company_name": "Lockheed Martin",
            "location": "Owego, New York",
            "contract_description": "overhaul contract",
            "estimated_completion_date": "April 16, 2034",
            "funds_obligated": "No funds are being obligated at time of award"
        })
        .to_string()
    }

    #[test]
    fn test_check_lines() {
        let gatekeeper = Gatekeeper::default_config();
        let lines = vec![good_line(), String::new(), "nope".to_string()];

        let outcomes = check_lines(&gatekeeper, true, &lines);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].accepted);
        assert_eq!(outcomes[1].line, 3);
        assert!(!outcomes[1].accepted);
        assert_eq!(outcomes[1].kind.as_deref(), Some("malformed"));
    }

    #[test]
    fn test_check_reports_placeholder() {
        let gatekeeper = Gatekeeper::default_config();
        let line = good_line().replace("Owego, New York", "N/A");

        let outcomes = check_lines(&gatekeeper, true, &[line]);

        assert_eq!(outcomes[0].kind.as_deref(), Some("placeholder"));
    }
}
