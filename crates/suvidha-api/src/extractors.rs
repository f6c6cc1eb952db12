//! # Request Body Extraction
//!
//! Helpers that turn Axum's JSON rejections into the API's structured
//! [`AppError`] envelope, plus the [`Validate`] hook for registration-form
//! rules that serde cannot express.
//!
//! Identity and mobile numbers are not checked here: they go through
//! `suvidha_core` so their failures carry reason codes. [`Validate`] covers
//! the free-text fields around them (name length, email shape).

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Field-level checks on a request DTO.
///
/// An `Err` message becomes a 422 `VALIDATION_ERROR` naming the field, e.g.
/// `"full_name must not be empty"`.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON body, mapping rejections to [`AppError::BadRequest`].
///
/// Handlers take `Result<Json<T>, JsonRejection>` so malformed bodies get
/// the structured error envelope instead of Axum's plain-text rejection.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// [`extract_json`] followed by [`Validate::validate`].
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

/// Parse a body whose every field is optional.
///
/// An empty body (with or without a content type) yields `T::default()`;
/// anything else must be valid JSON for `T`.
pub fn extract_optional_json<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| AppError::BadRequest(format!("invalid JSON body: {err}")))
}
