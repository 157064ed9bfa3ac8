//! Raw response decoding.
//!
//! A response is JSON text: one object for a single resource, an array of objects for many.
//! Anything else is a [`EntityError::Deserialization`], kept apart from client failures.

use crate::framework::client::FieldMap;
use crate::framework::error::EntityError;
use serde::Serialize;
use serde_json::Value;

pub fn from_response(raw: &str) -> Result<FieldMap, EntityError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn from_response_many(raw: &str) -> Result<Vec<FieldMap>, EntityError> {
    Ok(serde_json::from_str(raw)?)
}

/// Serialize a typed payload into the [`FieldMap`] that `create` / `save` take.
///
/// `None` fields are kept as `Null`; skip them with `#[serde(skip_serializing_if)]`.
pub fn to_fields<T: Serialize>(payload: &T) -> Result<FieldMap, EntityError> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(EntityError::Deserialization(format!(
            "expected an object, got {other}"
        ))),
    }
}
