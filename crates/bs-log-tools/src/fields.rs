//! Defensive field access over loosely structured JSON payloads.
//!
//! Remote rows carry no fixed schema, so every read goes through these
//! helpers: try a list of candidate keys, skip nulls and empty strings, and
//! coerce numbers that may arrive as ints, floats, or numeric strings.

use serde_json::{Map, Value};

/// A decoded JSON object.
pub type Object = Map<String, Value>;

/// How many string layers `parse_raw_obj` will peel off a double-encoded payload.
const MAX_RAW_DECODE_DEPTH: usize = 2;

/// Return the first non-empty value among `keys`.
pub fn extract_value<'a>(map: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|val| match val {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
}

/// Return the first non-empty value among `keys`, rendered as a string.
pub fn extract_string(map: &Object, keys: &[&str]) -> Option<String> {
    extract_value(map, keys).map(value_to_string)
}

/// Borrow a nested object by key.
pub fn get_object<'a>(map: &'a Object, key: &str) -> Option<&'a Object> {
    map.get(key).and_then(Value::as_object)
}

/// Render a scalar or structured value as display text.
pub fn value_to_string(val: &Value) -> String {
    match val {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Coerce an int, float, or numeric string to an integer.
///
/// Floats are truncated toward zero; non-finite values and non-numeric
/// strings yield `None`.
pub fn coerce_int(val: &Value) -> Option<i64> {
    match val {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_to_int)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
        }
        _ => None,
    }
}

/// Coerce an int, float, or numeric string to a float.
pub fn coerce_float(val: &Value) -> Option<f64> {
    match val {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    (f.is_finite() && f.abs() < i64::MAX as f64).then(|| f.trunc() as i64)
}

/// Decode a row's raw payload into an object.
///
/// Accepts an already-parsed object or a JSON-encoded string (possibly
/// encoded twice). Anything else yields `None`.
pub fn parse_raw_obj(raw: &Value) -> Option<Object> {
    let mut current = raw.clone();
    for _ in 0..=MAX_RAW_DECODE_DEPTH {
        match current {
            Value::Object(map) => return Some(map),
            Value::String(s) => current = serde_json::from_str(&s).ok()?,
            _ => return None,
        }
    }
    None
}
