//! Read-only string-keyed JSON mappings.
//!
//! Used for `context`, `integrations`, `properties`, and `traits`. Values
//! are copied in when a setter runs; after that an [`Attributes`] only
//! exposes shared references.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use analytics_core::{AppError, AppResult};

/// An owned, read-only JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Copy the entries into a new JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Return a copy with `key` set to `value`.
    pub(crate) fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Convert an envelope mapping (`context`, `integrations`).
    ///
    /// `null` is an invalid argument here.
    pub(crate) fn from_envelope_value(field: &str, value: Value) -> AppResult<Self> {
        match value {
            Value::Null => Err(AppError::invalid_argument(format!(
                "{field} cannot be null."
            ))),
            other => Self::from_object(field, other),
        }
    }

    /// Convert an optional payload mapping (`properties`, `traits`).
    ///
    /// `null` is reported as a null reference, not an invalid argument.
    pub(crate) fn from_payload_value(field: &str, value: Value) -> AppResult<Self> {
        match value {
            Value::Null => Err(AppError::null_reference(format!("Null {field}"))),
            other => Self::from_object(field, other),
        }
    }

    fn from_object(field: &str, value: Value) -> AppResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AppError::invalid_argument(format!(
                "{field} must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
