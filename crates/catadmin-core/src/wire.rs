//! Lenient deserializers for backend fields whose wire type varies.
//!
//! The backend stores booleans as tinyint columns and echoes form input back
//! verbatim, so `status` may arrive as `true`, `1` or `"1"`, and `parent_id`
//! may arrive as `null`, `5` or `"5"`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a boolean-ish value (`bool`, number, or string).
///
/// `null` and unrecognised strings are treated as `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        _ => false,
    })
}

/// Deserializes an optional integer id (`null`, number, or numeric string).
///
/// Empty strings map to `None`; non-numeric strings are an error.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid id: {:?}", s))),
        Some(other) => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}
