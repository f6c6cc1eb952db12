//! # Identity API
//!
//! Routes:
//! - POST /v1/identity/validate: format and checksum check; failure is data
//! - POST /v1/identity/verify: validate, then verify with the configured authority
//!
//! `validate` always answers 200: a rejected number is an ordinary outcome
//! of interactive form validation, reported in the body. `verify` answers
//! 422 for a rejected number because verification cannot proceed.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use suvidha_core::{validate_format, ValidationReport};
use suvidha_identity::VerificationOutcome;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Identity-number validation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateIdentityRequest {
    /// Identity number as typed; spaces and hyphens are allowed.
    pub identity_number: String,
}

/// Identity-number validation result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
    /// Cleaned 12-digit value, present only when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned: Option<String>,
    /// `InvalidFormat` or `ChecksumMismatch`, present only when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// `length`, `reserved_leading_digit` or `repeated_digit` for format failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<String>,
    pub message: String,
}

impl From<ValidationReport> for ValidationResponse {
    fn from(report: ValidationReport) -> Self {
        Self {
            valid: report.valid,
            cleaned: report.cleaned,
            reason: report.reason.map(|r| r.as_str().to_string()),
            violation: report.violation.map(|v| v.as_str().to_string()),
            message: report.message,
        }
    }
}

/// Identity verification request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyIdentityRequest {
    pub identity_number: String,
    /// One-time password from the identity authority (production mode).
    #[serde(default)]
    pub otp: Option<String>,
}

/// Identity verification result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerificationResponse {
    pub verified: bool,
    /// `sandbox` or `production`.
    pub mode: String,
    pub masked_number: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Whether a citizen with this number is already registered.
    pub already_registered: bool,
}

impl VerificationResponse {
    pub(crate) fn new(outcome: VerificationOutcome, already_registered: bool) -> Self {
        Self {
            verified: outcome.verified,
            mode: outcome.mode.as_str().to_string(),
            masked_number: outcome.masked_number,
            message: outcome.message,
            name: outcome.name,
            verified_at: outcome.verified_at,
            reference: outcome.reference,
            already_registered,
        }
    }
}

/// Build the identity router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/identity/validate", post(validate_identity))
        .route("/v1/identity/verify", post(verify_identity))
}

/// POST /v1/identity/validate: Check format and checksum.
#[utoipa::path(
    post,
    path = "/v1/identity/validate",
    request_body = ValidateIdentityRequest,
    responses(
        (status = 200, description = "Validation outcome, valid or not", body = ValidationResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
    ),
    tag = "identity"
)]
pub(crate) async fn validate_identity(
    body: Result<Json<ValidateIdentityRequest>, JsonRejection>,
) -> Result<Json<ValidationResponse>, AppError> {
    let req = extract_json(body)?;
    let report = ValidationReport::of(&req.identity_number);
    if let Some(reason) = report.reason {
        tracing::debug!(%reason, "identity number rejected");
    }
    Ok(Json(report.into()))
}

/// POST /v1/identity/verify: Validate, then verify with the authority.
#[utoipa::path(
    post,
    path = "/v1/identity/verify",
    request_body = VerifyIdentityRequest,
    responses(
        (status = 200, description = "Verification outcome", body = VerificationResponse),
        (status = 422, description = "Identity number rejected", body = crate::error::ErrorBody),
        (status = 503, description = "Identity authority not available", body = crate::error::ErrorBody),
    ),
    tag = "identity"
)]
pub(crate) async fn verify_identity(
    State(state): State<AppState>,
    body: Result<Json<VerifyIdentityRequest>, JsonRejection>,
) -> Result<Json<VerificationResponse>, AppError> {
    let req = extract_json(body)?;
    let number = validate_format(&req.identity_number)?;
    let already_registered = state.citizens.is_registered(&number);
    let outcome = state.verifier.verify_number(&number, req.otp.as_deref())?;

    tracing::info!(
        identity = %number,
        verified = outcome.verified,
        already_registered,
        "identity verification"
    );
    Ok(Json(VerificationResponse::new(outcome, already_registered)))
}
