//! Request body decoding.

use axum::{Json, extract::rejection::JsonRejection};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// Decode a JSON body that must be an object.
///
/// Derived `Deserialize` impls also accept a JSON array as positional
/// struct fields; request bodies only take the object form.
pub fn json_object<T: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = body.map_err(|rejection| {
        tracing::debug!("rejected request body: {rejection}");
        ApiError::InvalidJson
    })?;

    if !value.is_object() {
        return Err(ApiError::InvalidJson);
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::debug!("rejected request body: {e}");
        ApiError::InvalidJson
    })
}
