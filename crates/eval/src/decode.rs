//! Decoding predicate arrays from schema JSON.
//!
//! A conditional branch carries a `when` array. Each element is an object
//! with exactly one key naming the predicate kind:
//!
//! ```json
//! [
//!   { "position": { "condition": "is", "value": "-1" } },
//!   { "customState": { "key": "expanded", "condition": "is", "value": 1 } }
//! ]
//! ```

use crate::types::{Condition, EvalError, Predicate, PredicateSet};

/// Decode a `when` predicate array. `null` decodes to the empty set.
pub fn parse_predicates(v: &serde_json::Value) -> Result<PredicateSet, EvalError> {
    if v.is_null() {
        return Ok(PredicateSet::new());
    }
    let arr = v.as_array().ok_or_else(|| EvalError::DeserializeError {
        message: "predicates must be an array".to_string(),
    })?;
    arr.iter().map(parse_predicate).collect()
}

/// Decode one `{ "<kind>": { ... } }` predicate object.
pub fn parse_predicate(v: &serde_json::Value) -> Result<Predicate, EvalError> {
    let obj = v.as_object().ok_or_else(|| EvalError::DeserializeError {
        message: "predicate must be an object".to_string(),
    })?;
    if obj.len() != 1 {
        return Err(EvalError::DeserializeError {
            message: format!("predicate must have exactly one kind, found {}", obj.len()),
        });
    }
    let Some((kind, body)) = obj.iter().next() else {
        return Err(EvalError::DeserializeError {
            message: "empty predicate object".to_string(),
        });
    };

    let condition = get_condition(body, kind)?;
    let predicate = match kind.as_str() {
        "progression" => Predicate::Progression {
            condition,
            value: get_index_value(body, kind)?,
        },
        "position" => Predicate::Position {
            condition,
            value: get_index_value(body, kind)?,
        },
        "breakpoint" => Predicate::Breakpoint {
            condition,
            value: get_str(body, kind, "value")?,
        },
        "darkMode" => Predicate::DarkMode {
            condition,
            value: get_bool(body, "value").unwrap_or(true),
        },
        "customState" => Predicate::CustomState {
            key: get_str(body, kind, "key")?,
            condition,
            value: get_i32(body, kind, "value")?,
        },
        "staticBoolean" => Predicate::StaticBoolean {
            condition,
            value: get_bool(body, "value").ok_or_else(|| missing(kind, "value"))?,
        },
        "staticString" => Predicate::StaticString {
            input: get_str(body, kind, "input")?,
            condition,
            value: get_str(body, kind, "value")?,
        },
        "creativeCopy" => Predicate::CreativeCopyExists {
            key: get_str(body, kind, "key")?,
            condition,
        },
        "placeholderTextValue" => Predicate::PlaceholderTextValue {
            input: get_str(body, kind, "input")?,
            condition,
            value: get_str(body, kind, "value")?,
        },
        "placeholderTextLength" => Predicate::PlaceholderTextLength {
            input: get_str(body, kind, "input")?,
            condition,
            value: get_index_value(body, kind)?,
        },
        "placeholderNumeric" => Predicate::PlaceholderNumeric {
            input: get_str(body, kind, "input")?,
            condition,
            value: get_index_value(body, kind)?,
        },
        other => {
            return Err(EvalError::UnknownPredicate {
                kind: other.to_string(),
            })
        }
    };
    Ok(predicate)
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn missing(kind: &str, field: &str) -> EvalError {
    EvalError::DeserializeError {
        message: format!("{} missing '{}'", kind, field),
    }
}

fn get_condition(body: &serde_json::Value, kind: &str) -> Result<Condition, EvalError> {
    let name = body
        .get("condition")
        .and_then(|c| c.as_str())
        .ok_or_else(|| missing(kind, "condition"))?;
    Condition::parse(name).ok_or_else(|| EvalError::InvalidCondition {
        predicate: kind.to_string(),
        condition: name.to_string(),
    })
}

fn get_str(body: &serde_json::Value, kind: &str, field: &str) -> Result<String, EvalError> {
    body.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| missing(kind, field))
}

fn get_bool(body: &serde_json::Value, field: &str) -> Option<bool> {
    body.get(field).and_then(|v| v.as_bool())
}

fn get_i32(body: &serde_json::Value, kind: &str, field: &str) -> Result<i32, EvalError> {
    body.get(field)
        .and_then(|v| v.as_i64())
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| missing(kind, field))
}

/// Index-like operands may be written as a string or a JSON number; both
/// are kept as text and parsed at evaluation time.
fn get_index_value(body: &serde_json::Value, kind: &str) -> Result<String, EvalError> {
    match body.get("value") {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        _ => Err(missing(kind, "value")),
    }
}
