//! Weakly-typed decoding of JSON values
//!
//! Each target has one function stating exactly which source shapes it
//! accepts. Every function returns `Ok(None)` for a JSON `null`, which the
//! caller treats as "present but empty".
//!
//! | target | null | bool | int | float | string | array | object |
//! |--------|------|------|-----|-------|--------|-------|--------|
//! | bool   | none | self | != 0 | != 0 | parsed | no | no |
//! | int    | none | 1/0  | self | truncated | parsed | no | no |
//! | string | none | "1"/"0" | decimal | decimal | self | no | no |
//! | map    | none | no | no | no | no | merged | self |
//! | slice  | none | lifted | lifted | lifted | lifted | self | `{}` empty, else lifted |

use std::num::IntErrorKind;

use serde_json::{Map, Number, Value};

use crate::schema::CoercionError;

/// Decodes a bool.
pub fn to_bool(value: &Value) -> Result<Option<bool>, CoercionError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Some(i != 0)),
            None => Ok(Some(n.as_f64().map_or(true, |f| f != 0.0))),
        },
        Value::String(s) => parse_bool(s).map(Some),
        Value::Array(_) | Value::Object(_) => Err(mismatch("bool", value)),
    }
}

/// Decodes a signed integer.
pub fn to_int(value: &Value) -> Result<Option<i64>, CoercionError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(i64::from(*b))),
        Value::Number(n) => number_to_int(n).map(Some),
        Value::String(s) => parse_int(s).map(Some),
        Value::Array(_) | Value::Object(_) => Err(mismatch("int", value)),
    }
}

/// Decodes a string.
pub fn to_string(value: &Value) -> Result<Option<String>, CoercionError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => Ok(Some(number_to_string(n))),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(mismatch("string", value)),
    }
}

/// Decodes a map. An array of maps is merged left to right.
pub fn to_map(value: &Value) -> Result<Option<Map<String, Value>>, CoercionError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map.clone())),
        Value::Array(items) => {
            let mut merged = Map::new();
            for (index, item) in items.iter().enumerate() {
                if let Some(map) = to_map(item).map_err(|e| element(index, e))? {
                    merged.extend(map);
                }
            }
            Ok(Some(merged))
        }
        _ => Err(mismatch("map", value)),
    }
}

/// Decodes a sequence. Non-array values are lifted into a single element,
/// except the empty object which becomes the empty sequence.
pub fn to_slice(value: &Value) -> Result<Option<Vec<Value>>, CoercionError> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(items.clone())),
        Value::Object(map) if map.is_empty() => Ok(Some(Vec::new())),
        other => Ok(Some(vec![other.clone()])),
    }
}

/// Decodes a sequence of strings. `null` elements become `""`.
pub fn to_string_slice(value: &Value) -> Result<Option<Vec<String>>, CoercionError> {
    let Some(items) = to_slice(value)? else {
        return Ok(None);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            to_string(item)
                .map(Option::unwrap_or_default)
                .map_err(|e| element(index, e))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Like [`to_string_slice`], but a single string is first split on commas.
/// The empty string yields the empty sequence.
pub fn to_comma_string_slice(value: &Value) -> Result<Option<Vec<String>>, CoercionError> {
    match value {
        Value::String(s) if s.is_empty() => Ok(Some(Vec::new())),
        Value::String(s) => Ok(Some(s.split(',').map(str::to_string).collect())),
        other => to_string_slice(other),
    }
}

/// Converts a JSON number to i64, truncating floats toward zero.
pub fn number_to_int(n: &Number) -> Result<i64, CoercionError> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if n.is_u64() {
        return Err(CoercionError::IntOverflow(n.to_string()));
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f.trunc() as i64)
        }
        _ => Err(CoercionError::IntOverflow(n.to_string())),
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    // f64's Display never switches to exponent notation
    match n.as_f64() {
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn parse_bool(s: &str) -> Result<bool, CoercionError> {
    match s {
        "" => Ok(false),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoercionError::InvalidBool(s.to_string())),
    }
}

/// Parses an integer with optional sign and base prefix (`0x`, `0o`, `0b`,
/// or a bare leading `0` for octal). `_` may separate digits.
fn parse_int(s: &str) -> Result<i64, CoercionError> {
    if s.is_empty() {
        return Ok(0);
    }
    let invalid = || CoercionError::InvalidInt(s.to_string());

    let (negative, unsigned) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits, prefixed) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest, true)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest, true)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest, true)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..], true)
    } else {
        (10, lower.as_str(), false)
    };

    let digits = strip_separators(digits, prefixed).ok_or_else(invalid)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let magnitude = u64::from_str_radix(&digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => CoercionError::IntOverflow(s.to_string()),
        _ => invalid(),
    })?;

    if negative {
        0i64.checked_sub_unsigned(magnitude)
            .ok_or_else(|| CoercionError::IntOverflow(s.to_string()))
    } else {
        i64::try_from(magnitude).map_err(|_| CoercionError::IntOverflow(s.to_string()))
    }
}

/// Removes `_` digit separators. Trailing and doubled separators are
/// rejected, and so is a leading one unless it follows a base prefix.
fn strip_separators(digits: &str, prefixed: bool) -> Option<String> {
    let digits = match digits.strip_prefix('_') {
        Some(rest) if prefixed => rest,
        _ => digits,
    };
    if !digits.contains('_') {
        return Some(digits.to_string());
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    Some(digits.replace('_', ""))
}

fn element(index: usize, source: CoercionError) -> CoercionError {
    CoercionError::Element {
        index,
        source: Box::new(source),
    }
}

fn mismatch(expected: &'static str, actual: &Value) -> CoercionError {
    CoercionError::TypeMismatch {
        expected,
        actual: json_type_name(actual),
    }
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "slice",
        Value::Object(_) => "map",
    }
}
