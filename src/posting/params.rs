//! Lenient deserializers for the request parameter bag.
//!
//! Clients post the same fields as form-style parameters, so integers may
//! arrive as JSON numbers or numeric strings and lists may arrive as a single
//! value.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// `null`, `""` and non-numeric strings become `None`.
pub fn optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_int))
}

/// Accepts a list or a single scalar; unparseable entries become `0`.
pub fn int_list<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| value_to_int(item).unwrap_or(0))
                .collect(),
        ),
        Some(Value::String(s)) if s.contains(',') => Some(
            s.split(',')
                .map(|part| part.trim().parse::<i64>().unwrap_or(0))
                .collect(),
        ),
        Some(other) => Some(vec![value_to_int(&other).unwrap_or(0)]),
    })
}

/// Accepts a list of strings or a comma-separated string.
pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
        ),
        Some(Value::String(s)) => Some(s.split(',').map(|t| t.trim().to_string()).collect()),
        Some(Value::Number(n)) => Some(vec![n.to_string()]),
        Some(_) => None,
    })
}
