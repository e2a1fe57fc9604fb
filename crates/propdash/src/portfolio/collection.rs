use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single upstream record (property, tenant, task or reminder).
///
/// The backend does not agree on one schema per resource, so the record keeps
/// the payload untouched and exposes field lookups instead of typed members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Value stored under `field`, if the record is an object carrying that key.
    pub fn field(&self, field: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(field))
    }

    /// True when the key exists, whatever its value (including `null`).
    pub fn has_field(&self, field: &str) -> bool {
        self.field(field).is_some()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Coerce any collection payload into an ordered list of records.
///
/// Accepts a bare array, a `{"results": [...]}` page, or a `{"count": n, "items": [...]}`
/// envelope. Every other shape, `null` included, yields an empty list.
pub fn normalize(input: &Value) -> Vec<Record> {
    match input {
        Value::Array(items) => to_records(items),
        Value::Object(map) => {
            if let Some(Value::Array(results)) = map.get("results") {
                return to_records(results);
            }
            match (map.get("count"), map.get("items")) {
                (Some(Value::Number(_)), Some(Value::Array(items))) => to_records(items),
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

fn to_records(items: &[Value]) -> Vec<Record> {
    items.iter().cloned().map(Record::new).collect()
}
