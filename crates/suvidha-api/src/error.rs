//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from suvidha-core and suvidha-identity to HTTP status
//! codes with JSON error bodies. Internal error details are never exposed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use suvidha_core::{InvalidMobileNumber, ValidationError};
use suvidha_identity::{AuthorityError, VerificationError};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses use this format. The `details` field carries
/// machine-readable context for identity-number rejections and is omitted
/// otherwise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "INVALID_IDENTITY_NUMBER").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors that carry them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Identity number rejected by format or checksum rules (422).
    #[error("{0}")]
    InvalidIdentity(ValidationError),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failure, missing or invalid token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Conflict with current resource state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Upstream dependency not configured or unreachable (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::InvalidIdentity(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_IDENTITY_NUMBER")
            }
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidIdentity(err) => Some(serde_json::json!({
                "reason": err.reason(),
                "violation": err.violation(),
            })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidIdentity(err)
    }
}

impl From<InvalidMobileNumber> for AppError {
    fn from(err: InvalidMobileNumber) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<AuthorityError> for AppError {
    fn from(err: AuthorityError) -> Self {
        match &err {
            AuthorityError::NotConfigured { .. } | AuthorityError::ServiceUnavailable { .. } => {
                Self::ServiceUnavailable(err.to_string())
            }
            AuthorityError::VerificationFailed { .. } => Self::Validation(err.to_string()),
        }
    }
}

impl From<VerificationError> for AppError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::Invalid(e) => e.into(),
            VerificationError::Authority(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use suvidha_core::FormatViolation;

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::Validation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
            ),
            (
                AppError::InvalidIdentity(ValidationError::ChecksumMismatch),
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_IDENTITY_NUMBER",
            ),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (
                AppError::ServiceUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
            ),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{err:?}");
        }
    }

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn invalid_identity_carries_reason_details() {
        let err = AppError::from(ValidationError::InvalidFormat(
            FormatViolation::ReservedLeadingDigit,
        ));
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error.message, "identity number cannot start with 0 or 1");
        let details = body.error.details.unwrap();
        assert_eq!(details["reason"], "InvalidFormat");
        assert_eq!(details["violation"], "reserved_leading_digit");
    }

    #[tokio::test]
    async fn checksum_details_have_null_violation() {
        let (_, body) = response_parts(ValidationError::ChecksumMismatch.into()).await;
        let details = body.error.details.unwrap();
        assert_eq!(details["reason"], "ChecksumMismatch");
        assert!(details["violation"].is_null());
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) = response_parts(AppError::Internal("lock poisoned".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(body.error.details.is_none());
    }

    #[test]
    fn not_configured_authority_maps_to_503() {
        let err = AppError::from(AuthorityError::NotConfigured {
            reason: "none".into(),
        });
        assert_eq!(err.status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn verification_error_unwraps_to_identity_error() {
        let err = AppError::from(VerificationError::Invalid(ValidationError::ChecksumMismatch));
        assert!(matches!(err, AppError::InvalidIdentity(_)));
    }

    #[test]
    fn mobile_error_is_validation() {
        let err = AppError::from(InvalidMobileNumber("123".into()));
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("123")));
    }
}
