//! Raw vendor day-summary records
//!
//! A [`RawDaySummary`] is one calendar day's summary exactly as the vendor
//! cloud returned it: an untyped JSON object whose key names drift across
//! firmware and API versions. The normalizer reads it through alias
//! precedence lists; this module only defines the container and the rule
//! for when a value counts as usable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One day's summary as returned by the vendor, keys untouched.
///
/// Read-only input to the normalizer. Construction never validates key
/// names: unknown keys are carried along and simply never consulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDaySummary(Map<String, Value>);

impl RawDaySummary {
    /// Wrap an already-parsed JSON object. Non-object values yield an
    /// empty record, which normalizes to all-defaults.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }

    /// Parse a JSON object from text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value))
    }

    /// Look up a metric by its vendor key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for RawDaySummary {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Extract a usable numeric reading from a raw value.
///
/// A value is usable iff it is present and truthy: JSON null, numeric zero,
/// empty strings, and strings that do not parse as numbers all count as
/// unusable and make the normalizer fall through to the next alias. Numeric
/// strings are accepted because some vendor payloads quote their numbers.
pub fn usable_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => {
            let n = n.as_f64()?;
            if n != 0.0 {
                Some(n)
            } else {
                None
            }
        }
        Value::String(s) => {
            let n: f64 = s.trim().parse().ok()?;
            if n != 0.0 {
                Some(n)
            } else {
                None
            }
        }
        _ => None,
    }
}
