//! Precontract module - scraped, unannotated announcements

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A scraped contract announcement before annotation
///
/// Precontracts are immutable. The reconciler treats them as the source of
/// truth for everything the annotator does not need to infer: branch,
/// source reference, announcement date and the raw text.
///
/// Batch files written by the scraper use its own key names
/// (`source_url`, `contract_text`, `contract_date`); those are accepted as
/// aliases, and `contract_date` may carry a time component, which is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precontract {
    /// Organizational unit heading the announcement section (may be empty)
    #[serde(default, alias = "branch")]
    pub military_branch: String,

    /// Originating article, usually its URL
    #[serde(alias = "source_url")]
    pub source_reference: String,

    /// Announcement text, untouched
    #[serde(alias = "contract_text")]
    pub raw_text: String,

    /// Date the announcement was published
    #[serde(alias = "contract_date", deserialize_with = "deserialize_calendar_date")]
    pub announcement_date: NaiveDate,
}

impl Precontract {
    /// Create a new precontract
    pub fn new(
        military_branch: impl Into<String>,
        source_reference: impl Into<String>,
        raw_text: impl Into<String>,
        announcement_date: NaiveDate,
    ) -> Self {
        Self {
            military_branch: military_branch.into(),
            source_reference: source_reference.into(),
            raw_text: raw_text.into(),
            announcement_date,
        }
    }
}

/// Accept "2024-04-17" as well as "2024-04-17T00:00:00"
fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid announcement date: {:?}", raw))
    })
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.parse::<NaiveDate>()
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scraper_format() {
        let json = r#"{
            "military_branch": "AIR FORCE",
            "source_url": "https://www.defense.gov/News/Contracts/Contract/Article/3691213/",
            "contract_text": "Lockheed Martin Corp., Owego, New York, has been awarded...",
            "contract_date": "2024-04-17T00:00:00"
        }"#;

        let precontract: Precontract = serde_json::from_str(json).unwrap();
        assert_eq!(precontract.military_branch, "AIR FORCE");
        assert!(precontract.source_reference.ends_with("/3691213/"));
        assert!(precontract.raw_text.starts_with("Lockheed"));
        assert_eq!(
            precontract.announcement_date,
            NaiveDate::from_ymd_opt(2024, 4, 17).unwrap()
        );
    }

    #[test]
    fn test_serialize_round_trip() {
        let precontract = Precontract::new(
            "Navy",
            "https://example.mil/Article/1/",
            "text",
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
        );
        let json = serde_json::to_string(&precontract).unwrap();
        assert!(json.contains("\"announcement_date\":\"2023-12-01\""));

        let back: Precontract = serde_json::from_str(&json).unwrap();
        assert_eq!(back, precontract);
    }

    #[test]
    fn test_missing_branch_defaults_to_empty() {
        let json = r#"{"source_reference": "x", "raw_text": "y", "announcement_date": "2024-01-02"}"#;
        let precontract: Precontract = serde_json::from_str(json).unwrap();
        assert_eq!(precontract.military_branch, "");
    }

    #[test]
    fn test_invalid_date_rejected() {
        let json = r#"{"source_reference": "x", "raw_text": "y", "announcement_date": "April 17, 2024"}"#;
        assert!(serde_json::from_str::<Precontract>(json).is_err());
    }
}
