//! Parse annotation lines into JSON values

use crate::error::ExtractorError;
use serde_json::Value;

/// Parse one annotation line
///
/// Only JSON syntax is checked here; whether the value is an object with
/// the right fields is the gatekeeper's job.
pub fn parse_annotation_line(line: &str, strip_code_fences: bool) -> Result<Value, ExtractorError> {
    let json_str = if strip_code_fences {
        extract_json(line)?
    } else {
        line.trim()
    };

    if json_str.is_empty() {
        return Err(ExtractorError::InvalidFormat("empty annotation line".to_string()));
    }

    serde_json::from_str(json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))
}

/// Extract JSON from a response, handling Markdown code fences
///
/// LLMs sometimes wrap JSON in ```` ```json ... ``` ````, and collapsing a
/// response to one line keeps the fence on the same line as the JSON.
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        // Already raw JSON
        return Ok(trimmed);
    };

    // Drop the language tag, if any
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let Some(body) = rest.trim_end().strip_suffix("```") else {
        return Err(ExtractorError::InvalidFormat("Unterminated code block".to_string()));
    };

    let body = body.trim();
    if body.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
    }
    Ok(body)
}
