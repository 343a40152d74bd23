//! Reusable field filters
//!
//! These filters normalise form values before validation

use serde_json::Value;

/// Filter signature: field name and incoming value to normalised value
pub type FieldFilter = Box<dyn Fn(&str, Value) -> Value + Send + Sync>;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    }
}

/// Filter: turn an empty string into null
pub fn empty_as_null() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) if s.is_empty() => Value::Null,
        other => other,
    }
}
