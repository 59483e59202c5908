//! Lenient accessors over loosely-typed analysis values
//!
//! The orchestrator's output has no fixed schema. These helpers answer
//! "is there something here?" and "how big is it?" without ever failing;
//! a type mismatch simply reads as absent or zero.

use serde_json::Value;

/// Whether a value carries content: not null, false, zero, or empty
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Whether `map[key]` exists and carries content
pub fn has_section(map: &serde_json::Map<String, Value>, key: &str) -> bool {
    map.get(key).is_some_and(is_present)
}

/// Length of a sized value: characters of a string, items of a list or map.
/// Scalars without a length yield `None`.
pub fn measure(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

/// Whether a subsection is substantial: a non-empty list or map, or a
/// string longer than `min_chars` characters
pub fn is_substantial(value: &Value, min_chars: usize) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::String(s) => s.chars().count() > min_chars,
        _ => false,
    }
}

/// Numeric reading of a value; anything non-numeric reads as 0
pub fn number(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}
