//! Annotation candidates - untrusted annotator output

use crate::Field;
use serde_json::{Map, Value};

/// One annotator response, structurally a JSON object and nothing more
///
/// Keys and value types are unchecked. The only way to turn a candidate into
/// a typed record is through the gatekeeper, which either rejects it or
/// hands back a validated candidate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationCandidate(Map<String, Value>);

impl AnnotationCandidate {
    /// Wrap a JSON value, returning `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Get the raw value under a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a schema field as a string, if present and a string
    pub fn get_str(&self, field: Field) -> Option<&str> {
        self.0.get(field.as_str()).and_then(Value::as_str)
    }

    /// Keys present on the candidate
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}
