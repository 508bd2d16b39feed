//! Entity spans over contract text

use serde::{Deserialize, Serialize};

/// A labelled entity inside a training text
///
/// `start` and `end` are character offsets (not bytes); `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// First character of the entity
    pub start: usize,

    /// One past the last character of the entity
    pub end: usize,

    /// Upper-case field label, e.g. `CONTRACT_ID`
    pub label: String,

    /// Surface form as it appears in the text
    pub value: String,
}

impl EntitySpan {
    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check that the span covers nothing
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check that two spans share at least one character
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One training example: cleaned text and its entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Cleaned contract text
    pub text: String,

    /// Entities, ordered by start offset
    pub entities: Vec<EntitySpan>,
}

/// Flatten line breaks into spaces and trim
pub fn clean_text(text: &str) -> String {
    text.replace(['\n', '\r'], " ").trim().to_string()
}

/// Locate the first exact occurrence of `value` in `text`
///
/// Returns `None` when the value is empty or absent.
pub fn locate_span(text: &str, value: &str, label: &str) -> Option<EntitySpan> {
    if value.is_empty() {
        return None;
    }
    let byte_start = text.find(value)?;
    let start = text[..byte_start].chars().count();

    Some(EntitySpan {
        start,
        end: start + value.chars().count(),
        label: label.to_string(),
        value: value.to_string(),
    })
}

/// Recompute every entity's offsets from its value
///
/// Used after hand-editing a corpus file. Entities whose value no longer
/// occurs in the text are removed; the number removed is returned.
pub fn recompute_offsets(example: &mut TrainingExample) -> usize {
    let before = example.entities.len();
    let text = example.text.as_str();

    example.entities = example
        .entities
        .iter()
        .filter_map(|entity| locate_span(text, &entity.value, &entity.label))
        .collect();
    example.entities.sort_by_key(|e| e.start);

    before - example.entities.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Line one\nline two\r\n"), "Line one line two");
    }

    #[test]
    fn test_locate_span() {
        let span = locate_span("Awarded to Acme Corp. in Owego", "Acme Corp.", "COMPANY_NAME").unwrap();
        assert_eq!(span.start, 11);
        assert_eq!(span.end, 21);
        assert_eq!(span.len(), 10);
    }

    #[test]
    fn test_locate_span_absent() {
        assert_eq!(locate_span("Awarded to Acme", "Boeing", "COMPANY_NAME"), None);
        assert_eq!(locate_span("Awarded to Acme", "", "COMPANY_NAME"), None);
    }

    #[test]
    fn test_locate_span_uses_character_offsets() {
        let span = locate_span("Société Générale, Paris", "Paris", "LOCATION").unwrap();
        assert_eq!(span.start, 18);
        assert_eq!(span.end, 23);
    }

    #[test]
    fn test_end_follows_value_length() {
        let span = locate_span("The Navy awarded FA8119-24-D-0008", "FA8119-24-D-0008", "CONTRACT_ID").unwrap();
        assert_eq!(span.end - span.start, "FA8119-24-D-0008".len());
    }

    #[test]
    fn test_overlaps() {
        let a = EntitySpan { start: 0, end: 10, label: "A".into(), value: String::new() };
        let b = EntitySpan { start: 5, end: 15, label: "B".into(), value: String::new() };
        let c = EntitySpan { start: 10, end: 12, label: "C".into(), value: String::new() };
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_recompute_offsets() {
        let mut example = TrainingExample {
            text: "Boeing, Seattle, Washington, was awarded".to_string(),
            entities: vec![
                EntitySpan { start: 40, end: 47, label: "LOCATION".into(), value: "Seattle".into() },
                EntitySpan { start: 0, end: 3, label: "COMPANY_NAME".into(), value: "Boeing".into() },
                EntitySpan { start: 0, end: 3, label: "FEDERAL_AGENCY".into(), value: "NAVSEA".into() },
            ],
        };

        let removed = recompute_offsets(&mut example);

        assert_eq!(removed, 1);
        assert_eq!(example.entities.len(), 2);
        assert_eq!(example.entities[0].label, "COMPANY_NAME");
        assert_eq!((example.entities[0].start, example.entities[0].end), (0, 6));
        assert_eq!((example.entities[1].start, example.entities[1].end), (8, 15));
    }
}
