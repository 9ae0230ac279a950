//! Decoder for the `{"status": ..., "data": ...}` envelope.
//!
//! Every `parse_*` method funnels through [`decode_data`], which maps HTTP
//! and envelope failures to `ApiError`, and then reshapes `data` with one of
//! the typed helpers below.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

const SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Value,
}

/// Check the HTTP status, parse the envelope and return its `data`.
pub(crate) fn decode_data(response: &HttpResponse) -> Result<Value, ApiError> {
    if response.status != 200 {
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        });
    }
    let envelope: Envelope = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    if envelope.status != SUCCESS {
        let message = failure_message(&envelope.data);
        tracing::warn!(status = %envelope.status, %message, "API call failed");
        return Err(ApiError::Api {
            message,
            data: envelope.data,
        });
    }
    Ok(envelope.data)
}

fn failure_message(data: &Value) -> String {
    match data {
        Value::String(message) => message.clone(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => data.to_string(),
        },
        other => other.to_string(),
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn shape_error(expected: &str, found: &Value) -> ApiError {
    ApiError::DeserializationError(format!("expected {expected}, found {found}"))
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `data` as a typed record.
pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    from_value(decode_data(response)?)
}

/// `data` as an identifier: `"12345"` or `12345`.
pub(crate) fn decode_id(response: &HttpResponse) -> Result<i64, ApiError> {
    let data = decode_data(response)?;
    value_as_i64(&data).ok_or_else(|| shape_error("an identifier", &data))
}

/// `data` as a flag: `true`/`false`, `"true"`/`"false"`, `1`/`0`.
pub(crate) fn decode_bool(response: &HttpResponse) -> Result<bool, ApiError> {
    let data = decode_data(response)?;
    match &data {
        Value::Bool(flag) => Ok(*flag),
        Value::String(s) if s == "true" || s == "1" => Ok(true),
        Value::String(s) if s == "false" || s == "0" => Ok(false),
        Value::Number(n) if n.as_i64() == Some(1) => Ok(true),
        Value::Number(n) if n.as_i64() == Some(0) => Ok(false),
        _ => Err(shape_error("a boolean", &data)),
    }
}

/// `data` as `{"count": "n"}`.
pub(crate) fn decode_count(response: &HttpResponse) -> Result<u64, ApiError> {
    let data = decode_data(response)?;
    data.get("count")
        .and_then(value_as_i64)
        .and_then(|count| u64::try_from(count).ok())
        .ok_or_else(|| shape_error("a count", &data))
}

/// `data` as a plain string.
pub(crate) fn decode_string(response: &HttpResponse) -> Result<String, ApiError> {
    match decode_data(response)? {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        other => Err(shape_error("a string", &other)),
    }
}

/// `data` as `{"<key>": [...]}`. A missing key or null array yields an empty list.
pub(crate) fn decode_wrapped<T: DeserializeOwned>(
    response: &HttpResponse,
    key: &str,
) -> Result<Vec<T>, ApiError> {
    let data = decode_data(response)?;
    match data {
        Value::Object(mut map) => match map.remove(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(items) => from_value(items),
        },
        Value::Null => Ok(Vec::new()),
        other => Err(shape_error(&format!("an object with `{key}`"), &other)),
    }
}

/// `data` as a bare array. Null yields an empty list.
pub(crate) fn decode_vec<T: DeserializeOwned>(response: &HttpResponse) -> Result<Vec<T>, ApiError> {
    match decode_data(response)? {
        Value::Null => Ok(Vec::new()),
        items => from_value(items),
    }
}

/// `data` as a key/value map. Null (or an empty array) yields an empty map.
pub(crate) fn decode_map<V: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<BTreeMap<String, V>, ApiError> {
    match decode_data(response)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::Array(items) if items.is_empty() => Ok(BTreeMap::new()),
        other => from_value(other),
    }
}
