//! Single-component scoring
//!
//! Lets callers check one section (for example after an agent finishes)
//! without running the full progressive validation.

use super::sections::{is_present, measure};
use crate::config::SectionKeys;
use crate::models::ComponentCheck;
use serde_json::Value;

const BASE_POINTS: f64 = 50.0;
const CONTENT_POINTS: f64 = 25.0;
/// Strings longer than this earn the content points
const MIN_TEXT_CHARS: usize = 50;
/// Score at which a component counts as valid
const VALID_THRESHOLD: f64 = 40.0;

/// Score `data` as the component `name`
pub fn check_component(name: &str, data: Option<&Value>, keys: &SectionKeys) -> ComponentCheck {
    let Some(data) = data.filter(|d| is_present(d)) else {
        return ComponentCheck {
            component: name.to_string(),
            valid: false,
            score: 0.0,
            reason: "Component is empty".to_string(),
            can_continue: true,
            recommendation: "Component missing but the analysis can proceed".to_string(),
        };
    };

    let mut score = BASE_POINTS;

    let has_content = match data {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => s.chars().count() > MIN_TEXT_CHARS,
        _ => false,
    };
    if has_content {
        score += CONTENT_POINTS;
    }

    if name == keys.avatar {
        score += avatar_bonus(data, keys);
    } else if name == keys.drivers {
        score += drivers_bonus(data, keys);
    } else if name == keys.insights {
        score += insights_bonus(data);
    }

    let score = score.min(100.0);
    let valid = score >= VALID_THRESHOLD;

    ComponentCheck {
        component: name.to_string(),
        valid,
        score,
        reason: format!(
            "Score: {:.1}% ({})",
            score,
            if valid { "valid" } else { "limited" }
        ),
        can_continue: true,
        recommendation: if valid {
            "Valid to proceed".to_string()
        } else {
            "Limited but can proceed".to_string()
        },
    }
}

fn avatar_bonus(data: &Value, keys: &SectionKeys) -> f64 {
    let Some(avatar) = data.as_object() else {
        return 0.0;
    };

    let mut bonus = 0.0;
    if avatar.get(&keys.avatar_demographics).is_some_and(is_present) {
        bonus += 5.0;
    }
    if has_at_least(avatar.get(&keys.avatar_pains), 3) {
        bonus += 10.0;
    }
    if has_at_least(avatar.get(&keys.avatar_desires), 3) {
        bonus += 10.0;
    }
    bonus
}

fn drivers_bonus(data: &Value, keys: &SectionKeys) -> f64 {
    let drivers = match data {
        Value::Object(map) => map.get(&keys.drivers_list).and_then(Value::as_array),
        Value::Array(items) => Some(items),
        _ => None,
    };
    match drivers {
        Some(list) if list.len() >= 2 => 15.0,
        _ => 0.0,
    }
}

fn insights_bonus(data: &Value) -> f64 {
    match data.as_array().map(Vec::len) {
        Some(n) if n >= 5 => 15.0,
        Some(n) if n >= 3 => 10.0,
        Some(n) if n >= 1 => 5.0,
        _ => 0.0,
    }
}

fn has_at_least(value: Option<&Value>, n: usize) -> bool {
    value
        .filter(|v| is_present(v))
        .and_then(measure)
        .is_some_and(|len| len >= n)
}
