//! Value semantics shared by inference, filtering, selection and coloring.
//!
//! Entities are matched by their string representation, so every module that
//! compares values goes through [`entity_key`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single dataset row: field name to JSON value, in document order.
pub type Record = serde_json::Map<String, Value>;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap()
});

/// The JSON shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Tag a value with its kind.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Short lowercase name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

/// String representation of a value used for entity identity.
///
/// Two values with the same key are the same entity, whichever field or
/// record they came from. A numeric `5` and a string `"5"` collide.
pub fn entity_key(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                format_float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Entity key of a record field; a missing field reads as `null`.
pub fn field_key(record: &Record, field: &str) -> String {
    record.get(field).map(entity_key).unwrap_or_else(|| "null".to_string())
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Parse a value as a number.
///
/// Strings yield their leading decimal literal (`"12.5kg"` is 12.5).
/// Booleans, null, arrays and objects are not numeric.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim_start();
            LEADING_NUMBER
                .find(trimmed)
                .and_then(|m| m.as_str().parse::<f64>().ok())
        }
        _ => None,
    }
}

/// True when the value is null or absent.
pub fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Entity keys of the elements of an array field, empty if the field is not an array.
pub fn array_keys(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(entity_key).collect(),
        _ => Vec::new(),
    }
}

/// True if `name` occurs anywhere in the record: as a scalar field's key or
/// as an element of an array field.
pub fn record_mentions(record: &Record, name: &str) -> bool {
    record.values().any(|value| match value {
        Value::Array(items) => items.iter().any(|item| entity_key(item) == name),
        Value::Object(_) => false,
        other => entity_key(other) == name,
    })
}
