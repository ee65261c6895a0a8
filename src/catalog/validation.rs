//! Field checks for raw JSON request bodies.
//!
//! Bodies are inspected as untyped JSON objects so that a value of the wrong
//! type (number, boolean, null, ...) is reported per field instead of failing
//! deserialization as a whole. Lengths are measured on the value exactly as
//! sent; whitespace is not trimmed.

use serde_json::{Map, Value};

use crate::error::ApiError;

/// A request body viewed as a JSON object.
pub type Body = Map<String, Value>;

/// Turn any JSON value into a body; non-objects behave like `{}`.
pub fn into_body(value: Value) -> Body {
    match value {
        Value::Object(map) => map,
        _ => Body::new(),
    }
}

/// Read a field that must be present and be a non-empty string.
pub fn required_str<'a>(body: &'a Body, field: &str) -> Result<&'a str, ApiError> {
    let value = match body.get(field) {
        Some(Value::String(s)) => s.as_str(),
        _ => {
            return Err(ApiError::Validation(format!(
                "'{field}' inválido, deve ser string"
            )))
        }
    };

    check_length(field, value)?;
    Ok(value)
}

/// Read a field that may be absent; when present it follows the same rules.
pub fn optional_str<'a>(body: &'a Body, field: &str) -> Result<Option<&'a str>, ApiError> {
    match body.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => {
            check_length(field, s)?;
            Ok(Some(s.as_str()))
        }
        Some(_) => Err(ApiError::Validation(format!("'{field}' deve ser string"))),
    }
}

fn check_length(field: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::Validation(format!(
            "'{field}' deve possuir no mínimo 1 caractere"
        )));
    }
    Ok(())
}
