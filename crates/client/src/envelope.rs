//! Normalization of the API's response envelopes.
//!
//! Successful bodies come either wrapped (`{"data": ..., "success": true}`)
//! or bare. Error bodies carry a message under one of several keys, an
//! optional `statusCode`, and an optional `errors` map of field messages.

use std::collections::BTreeMap;

use museum_core::validation::FieldErrors;
use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Longest raw text body echoed back as an error message.
const MAX_TEXT_MESSAGE: usize = 500;

/// Page metadata keys that may sit next to a top-level `data` array.
const PAGE_KEYS: &[&str] = &[
    "pageIndex",
    "pageNumber",
    "currentPage",
    "pageSize",
    "totalItems",
    "totalCount",
    "totalRecords",
    "totalPages",
];

/// Unwrapped success payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Unwrapped {
    pub data: Value,
    pub success: bool,
    pub message: Option<String>,
}

/// Decode a 2xx body.
///
/// Empty bodies read as `null`; non-JSON text is returned as a string.
/// An explicit `success: false` is turned into an error.
pub fn parse_success(body: &[u8]) -> Result<Unwrapped, ApiError> {
    let value = match parse_body(body) {
        Body::Empty => Value::Null,
        Body::Json(value) => value,
        Body::Text(text) => Value::String(text),
    };

    let Value::Object(mut obj) = value else {
        return Ok(Unwrapped {
            data: value,
            success: true,
            message: None,
        });
    };

    if !is_envelope(&obj) {
        return Ok(Unwrapped {
            data: Value::Object(obj),
            success: true,
            message: None,
        });
    }

    let success = obj.get("success").and_then(Value::as_bool).unwrap_or(true);
    let message = string_field(&obj, &["message"]);

    if !success {
        return Err(error_from_object(&obj, StatusCode::BAD_REQUEST.as_u16()));
    }

    // A paged body with `data` beside its counts is the payload itself.
    let data = if is_flat_page(&obj) {
        Value::Object(obj)
    } else {
        obj.remove("data").unwrap_or(Value::Null)
    };
    Ok(Unwrapped {
        data,
        success,
        message,
    })
}

/// Build an [`ApiError`] from a non-2xx response.
pub fn parse_error(status: StatusCode, body: &[u8]) -> ApiError {
    match parse_body(body) {
        Body::Json(Value::Object(obj)) => error_from_object(&obj, status.as_u16()),
        Body::Json(Value::String(text)) | Body::Text(text) if !text.trim().is_empty() => {
            ApiError::Status {
                status: status.as_u16(),
                message: truncate(text.trim()),
                errors: None,
            }
        }
        _ => ApiError::Status {
            status: status.as_u16(),
            message: reason(status),
            errors: None,
        },
    }
}

enum Body {
    Empty,
    Json(Value),
    Text(String),
}

fn parse_body(body: &[u8]) -> Body {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Body::Empty;
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => Body::Json(value),
        Err(_) => Body::Text(String::from_utf8_lossy(body).into_owned()),
    }
}

/// A wrapped body carries `data` or `success`; anything else is a bare record.
fn is_envelope(obj: &Map<String, Value>) -> bool {
    obj.contains_key("data") || obj.get("success").is_some_and(Value::is_boolean)
}

fn is_flat_page(obj: &Map<String, Value>) -> bool {
    obj.get("data").is_some_and(Value::is_array) && PAGE_KEYS.iter().any(|k| obj.contains_key(*k))
}

fn error_from_object(obj: &Map<String, Value>, http_status: u16) -> ApiError {
    // The body's statusCode wins only when it is itself an error code.
    let status = status_field(obj)
        .filter(|s| *s >= 400)
        .unwrap_or(http_status);
    let errors = obj.get("errors").and_then(field_errors);
    let message = string_field(obj, &["message", "error", "title", "detail"])
        .or_else(|| errors.as_ref().map(|_| "Validation failed".to_string()))
        .unwrap_or_else(|| {
            StatusCode::from_u16(status)
                .map(reason)
                .unwrap_or_else(|_| "Request failed".to_string())
        });
    ApiError::Status {
        status,
        message,
        errors,
    }
}

fn status_field(obj: &Map<String, Value>) -> Option<u16> {
    obj.get("statusCode")
        .or_else(|| obj.get("status"))
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// `errors` may map a field to a list of messages or to a single string.
fn field_errors(value: &Value) -> Option<FieldErrors> {
    let obj = value.as_object()?;
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (field, messages) in obj {
        let collected: Vec<String> = match messages {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => continue,
        };
        if !collected.is_empty() {
            map.entry(field.clone()).or_default().extend(collected);
        }
    }
    if map.is_empty() {
        None
    } else {
        Some(FieldErrors::from(map))
    }
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_TEXT_MESSAGE).collect()
}
