//! Artifact and batch file naming

use dodcon_domain::Contract;

/// Suffix used when a source reference has no usable path segment
const UNKNOWN_SOURCE: &str = "unknown";

/// Last non-empty path segment of a source reference
///
/// `https://www.defense.gov/News/Contracts/Contract/Article/3691213/` gives
/// `3691213`. Characters that are unsafe in file names become `_`.
pub fn source_reference_suffix(source_reference: &str) -> String {
    let without_query = source_reference
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let segment = without_query
        .split('/')
        .rfind(|s| !s.is_empty())
        .unwrap_or_default();

    // "https:" alone is a scheme, not a segment
    let segment = if segment.ends_with(':') { "" } else { segment };

    let sanitized = sanitize(segment);
    if sanitized.is_empty() {
        UNKNOWN_SOURCE.to_string()
    } else {
        sanitized
    }
}

/// Artifact file name for a batch: `<YYYY-MM-DD>_<source suffix>.json`,
/// derived from its first contract
pub fn artifact_file_name(first: &Contract) -> String {
    format!(
        "{}_{}.json",
        first.announcement_date.format("%Y-%m-%d"),
        source_reference_suffix(&first.source_reference)
    )
}

/// Join a multi-line annotator response into the one-line batch format
///
/// Each line is trimmed and the pieces are joined with single spaces.
pub fn collapse_response(response: &str) -> String {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}
