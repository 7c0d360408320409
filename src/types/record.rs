use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::amount::parse_amount;

/// One reconciliation line: an ordered mapping from field name to value.
///
/// Field order follows the inbound dataset, which is what column inference
/// relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap an already-parsed JSON object.
    #[must_use]
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Borrow the underlying fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record, returning its fields.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Field names in dataset order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    /// Read the identity stored in `field`.
    ///
    /// Numeric identifiers are read as their decimal text; anything other
    /// than a string or number has no identity.
    #[must_use]
    pub fn id_in(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Read the numeric amount stored in `field`.
    #[must_use]
    pub fn amount_in(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(parse_amount)
    }

    /// Text content of `field`, treating null and missing as empty.
    #[must_use]
    pub fn text_in(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Overwrite fields from `values`, leaving `protected` untouched.
    pub fn merge_from(&mut self, values: &Map<String, Value>, protected: &str) {
        for (key, value) in values {
            if key != protected {
                self.0.insert(key.clone(), value.clone());
            }
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
