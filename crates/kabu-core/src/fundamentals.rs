use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat key-value record of company fundamentals, keyed the way Yahoo! Finance names them
/// (e.g., `longName`, `marketCap`, `trailingPE`).
///
/// Absent keys, nulls, zeroes & empty strings all read as "not available".
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct Fundamentals(pub BTreeMap<String, Value>);

impl Fundamentals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .filter(|n| *n != 0.0 && n.is_finite())
    }

    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_empty_values_are_unavailable() {
        let info: Fundamentals = serde_json::from_value(json!({
            "longName": "Apple Inc.",
            "sector": "",
            "marketCap": 0,
            "trailingPE": null,
            "fullTimeEmployees": 161000
        }))
        .unwrap();

        assert_eq!(info.text("longName").as_deref(), Some("Apple Inc."));
        assert_eq!(info.text("sector"), None);
        assert_eq!(info.text("industry"), None);
        assert_eq!(info.text("fullTimeEmployees").as_deref(), Some("161000"));
        assert_eq!(info.number("marketCap"), None);
        assert_eq!(info.number("trailingPE"), None);
        assert_eq!(info.number("fullTimeEmployees"), Some(161000.0));
    }
}
