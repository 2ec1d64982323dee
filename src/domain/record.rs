//! Raw questionnaire records as submitted by clients.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single client-supplied value.
///
/// Clients send numbers, free-text codes, booleans or `null` for any field,
/// so values stay untyped until the normalizer interprets them. Nested
/// objects and arrays land in `Other`; they never encode as a known code and
/// are rejected where a number is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Whether the value counts as missing (null or blank text).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) | Self::Other(_) => false,
        }
    }

    /// Numeric zero or `false`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0.0,
            Self::Bool(b) => !b,
            Self::Null | Self::Text(_) | Self::Other(_) => false,
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Client-facing field map (`age`, `bloodGroup`, `weightGain`, ...).
///
/// Every field is optional and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// The value stored under `key`, exactly as supplied.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }

    /// The value under `key` unless it is absent, null or blank.
    #[must_use]
    pub fn present(&self, key: &str) -> Option<&RawValue> {
        self.get(key).filter(|v| !v.is_blank())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_values() {
        let json = r#"{"age": 31, "bmi": "24.5", "bloodGroup": "O+", "pregnant": null, "weightGain": true}"#;
        let record: RawRecord = serde_json::from_str(json).expect("Should parse");

        assert_eq!(record.get("age"), Some(&RawValue::Number(31.0)));
        assert_eq!(record.get("bmi"), Some(&RawValue::Text("24.5".into())));
        assert_eq!(record.get("pregnant"), Some(&RawValue::Null));
        assert_eq!(record.get("weightGain"), Some(&RawValue::Bool(true)));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_nested_values_do_not_reject_the_record() {
        let json = r#"{"age": 30, "meta": {"source": "web"}, "bloodGroup": ["O+"]}"#;
        let record: RawRecord = serde_json::from_str(json).expect("Should parse");

        assert_eq!(record.get("age"), Some(&RawValue::Number(30.0)));
        assert!(matches!(record.get("meta"), Some(RawValue::Other(_))));
        assert!(matches!(record.get("bloodGroup"), Some(RawValue::Other(_))));
        assert!(record.present("meta").is_some());
    }

    #[test]
    fn test_is_zero() {
        assert!(RawValue::from(0).is_zero());
        assert!(RawValue::from(false).is_zero());
        assert!(!RawValue::from("0").is_zero());
        assert!(!RawValue::from(0.5).is_zero());
        assert!(!RawValue::Null.is_zero());
    }

    #[test]
    fn test_present_skips_blank_values() {
        let record = RawRecord::new()
            .with("age", "")
            .with("bmi", "   ")
            .with("hb", RawValue::Null)
            .with("fsh", 0);

        assert!(record.present("age").is_none());
        assert!(record.present("bmi").is_none());
        assert!(record.present("hb").is_none());
        assert!(record.present("missing").is_none());
        assert_eq!(record.present("fsh"), Some(&RawValue::Number(0.0)));
    }
}
