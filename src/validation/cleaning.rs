//! Output cleaning
//!
//! The orchestrator tags failed steps with markers such as `ERRO_` or
//! `INVALID_`. Cleaning removes those fields before the analysis is shown,
//! keeping everything else in place.

use crate::Analysis;
use serde_json::Value;

/// Recursively drop map entries whose key contains a marker or whose value
/// is a string containing one, and list items that are such strings.
///
/// Matching is case-insensitive. Containers are cleaned in place rather
/// than dropped, so the nesting of the surviving data is unchanged.
/// Applying it twice gives the same result as applying it once.
pub fn clean_analysis(analysis: &Analysis, markers: &[String]) -> Analysis {
    let markers: Vec<String> = markers
        .iter()
        .filter(|m| !m.is_empty())
        .map(|m| m.to_uppercase())
        .collect();
    clean_map(analysis, &markers)
}

fn clean_map(map: &Analysis, markers: &[String]) -> Analysis {
    map.iter()
        .filter(|(key, value)| !has_marker(key, markers) && !is_marked_text(value, markers))
        .map(|(key, value)| (key.clone(), clean_value(value, markers)))
        .collect()
}

fn clean_value(value: &Value, markers: &[String]) -> Value {
    match value {
        Value::Object(map) => Value::Object(clean_map(map, markers)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|item| !is_marked_text(item, markers))
                .map(|item| clean_value(item, markers))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn is_marked_text(value: &Value, markers: &[String]) -> bool {
    value.as_str().is_some_and(|s| has_marker(s, markers))
}

fn has_marker(text: &str, markers: &[String]) -> bool {
    let upper = text.to_uppercase();
    markers.iter().any(|m| upper.contains(m.as_str()))
}
