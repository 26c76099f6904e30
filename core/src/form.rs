//! `application/x-www-form-urlencoded` encoding of request payloads.
//!
//! # Design
//! The value is lowered to a `serde_json::Value` first, so anything that can
//! be serialized to JSON can be offered here. Only records map onto form
//! fields, so the top level must be an object. Nested structure is flattened
//! with bracket keys: `{"user":{"tags":["a"]}}` becomes `user[tags][0]=a`.
//! Receivers that expect dotted keys (`user.tags.0`) will not rebuild the
//! nesting. Empty record keys are rejected, since `k[]` already means "append
//! to list `k`" in the bracket convention.
//!
//! Object keys come out sorted (`serde_json::Map` is ordered by key) and array
//! elements in index order, so the same value always encodes to the same text.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use crate::body::Body;
use crate::error::PayloadError;
use crate::finite::ensure_finite;

/// Encode `value` as percent-encoded `key=value` pairs joined by `&`.
pub fn encode_form<T>(value: &T) -> Result<Body, PayloadError>
where
    T: Serialize + ?Sized,
{
    ensure_finite(value)?;
    let value = serde_json::to_value(value).map_err(PayloadError::json)?;
    let record = match value {
        Value::Object(record) => record,
        other => {
            return Err(PayloadError::form(format!(
                "top level must be a record, got {}",
                kind(&other)
            )))
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in &record {
        flatten(field(key)?.to_string(), value, &mut pairs)?;
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&pairs)
        .finish();
    debug!(fields = pairs.len(), len = encoded.len(), "encoded form body");
    Ok(Body::form(encoded))
}

/// Push one pair per leaf under `prefix`.
fn flatten(
    prefix: String,
    value: &Value,
    pairs: &mut Vec<(String, String)>,
) -> Result<(), PayloadError> {
    match value {
        Value::Object(record) => {
            for (key, child) in record {
                flatten(format!("{prefix}[{}]", field(key)?), child, pairs)?;
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(format!("{prefix}[{index}]"), child, pairs)?;
            }
        }
        Value::String(s) => pairs.push((prefix, s.clone())),
        Value::Number(n) => pairs.push((prefix, n.to_string())),
        Value::Bool(b) => pairs.push((prefix, b.to_string())),
        Value::Null => pairs.push((prefix, String::new())),
    }
    Ok(())
}

fn field(key: &str) -> Result<&str, PayloadError> {
    if key.is_empty() {
        return Err(PayloadError::form("record keys must not be empty"));
    }
    Ok(key)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "record",
    }
}
