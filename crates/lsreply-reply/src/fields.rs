//! Typed field accessors with default fallback.
//!
//! None of these fail. An absent field, a field of the wrong JSON type, or
//! a tree that is not an object all yield the caller's default.

use serde_json::Value;

/// Boolean member `name`, or `default`.
pub fn get_bool(parsed: &Value, name: &str, default: bool) -> bool {
    parsed.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Owned copy of string member `name`, or of `default`.
pub fn get_string(parsed: &Value, name: &str, default: &str) -> String {
    parsed
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Numeric member `name` narrowed to `i32`, or `default`.
///
/// Fractional values truncate toward zero; values outside the `i32` range
/// saturate at `i32::MIN` / `i32::MAX`.
pub fn get_int(parsed: &Value, name: &str, default: i32) -> i32 {
    match parsed.get(name) {
        Some(Value::Number(number)) => {
            if let Some(value) = number.as_i64() {
                narrow_i64(value)
            } else if number.as_u64().is_some() {
                i32::MAX
            } else {
                // `as` saturates and maps NaN to 0.
                number.as_f64().map_or(default, |value| value as i32)
            }
        }
        _ => default,
    }
}

fn narrow_i64(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
