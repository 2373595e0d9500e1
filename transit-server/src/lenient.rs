//! Tolerant deserializers for loosely typed upstream JSON.
//!
//! Both upstream feeds are inconsistent about scalar types: ids arrive as
//! strings or numbers, flags as booleans or `"true"`/`"1"` strings, and
//! lists as `null` when empty.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a boolean flag.
///
/// `true`, `"true"` (any case), `"1"` and non-zero numbers are truthy.
/// Everything else, including absent values, is falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => str_is_truthy(s),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// String form of [`is_truthy`]: `"1"` or `"true"` in any case, ignoring
/// surrounding whitespace.
pub fn str_is_truthy(s: &str) -> bool {
    let s = s.trim();
    s == "1" || s.eq_ignore_ascii_case("true")
}

/// Render a scalar as a string. `null` and compound values yield `None`.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize a flag field, treating anything unrecognised as `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(is_truthy(value.as_ref()))
}

/// Deserialize a string that may have been sent as a number or `null`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

/// Like [`string_or_number`] but keeps `null` distinct.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

/// Deserialize `null` as the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
