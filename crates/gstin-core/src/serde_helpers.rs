/// Serde helper functions for the loosely-typed lookup payload.
///
/// The remote API is not strict about scalar types: a PIN code may arrive as
/// `"411001"` or `411001`, and a nature-of-business field may be a list or a
/// single string. These helpers accept the reasonable variants and reject
/// structured values (objects, nested arrays) so that the caller can fall
/// back to a structural dump instead of silently dropping data.
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Converts a scalar JSON value to its display string.
///
/// | JSON            | Result               |
/// |-----------------|----------------------|
/// | `null`          | `Ok(None)`           |
/// | `"text"`        | `Ok(Some("text"))`   |
/// | `411001`        | `Ok(Some("411001"))` |
/// | `true`          | `Ok(Some("true"))`   |
/// | object / array  | `Err(..)`            |
pub fn scalar_to_string(value: &Value) -> Result<Option<String>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err("expected a string or number"),
    }
}

/// Deserializer for an optional scalar that may be a string, number or bool.
///
/// Use with `#[serde(default, deserialize_with = "...")]` so that an absent
/// key yields `None`.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(&value).map_err(D::Error::custom)
}

/// Deserializer for an optional list of scalars.
///
/// A bare scalar is treated as a one-element list; `null` yields `None`.
pub fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    string_list(&value).map_err(D::Error::custom)
}

/// Shared implementation behind [`deserialize_string_list`], also used by the
/// display layer on raw values.
pub fn string_list(value: &Value) -> Result<Option<Vec<String>>, &'static str> {
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if let Some(s) = scalar_to_string(item)? {
                    out.push(s);
                }
            }
            Ok(Some(out))
        }
        Value::Null | Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            Ok(scalar_to_string(value)?.map(|s| vec![s]))
        }
        Value::Object(_) => Err("expected a list of strings"),
    }
}
