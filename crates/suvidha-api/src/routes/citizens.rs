//! # Citizens API
//!
//! Routes:
//! - POST /v1/citizens: register a citizen after identity validation
//! - GET /v1/citizens/{id}: fetch a citizen record
//! - POST /v1/citizens/{id}/verify-identity: re-verify a registered identity
//!
//! Registration runs the same validation as `/v1/identity/validate` and
//! refuses a number that is already registered before contacting any
//! identity authority.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use suvidha_core::{validate_format, MobileNumber};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_optional_json, extract_validated_json, Validate};
use crate::routes::identity::VerificationResponse;
use crate::state::{AppState, CitizenRecord, NewCitizen, RegistryError};

const MAX_NAME_LEN: usize = 100;

/// Citizen registration request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterCitizenRequest {
    pub full_name: String,
    /// Identity number as typed; spaces and hyphens are allowed.
    pub identity_number: String,
    /// Ten-digit mobile number, optionally prefixed with `+91`.
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    /// One-time password for production-mode verification.
    #[serde(default)]
    pub otp: Option<String>,
}

impl Validate for RegisterCitizenRequest {
    fn validate(&self) -> Result<(), String> {
        let name = self.full_name.trim();
        if name.is_empty() {
            return Err("full_name must not be empty".to_string());
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(format!("full_name must not exceed {MAX_NAME_LEN} characters"));
        }
        if let Some(email) = self.email.as_deref().map(str::trim) {
            if !email.is_empty() && !is_plausible_email(email) {
                return Err("email address is not valid".to_string());
            }
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Identity re-verification request for a registered citizen.
///
/// The body may be omitted entirely when no OTP is supplied.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerifyCitizenRequest {
    #[serde(default)]
    pub otp: Option<String>,
}

/// Citizen record with the outcome of its latest verification.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CitizenVerificationResponse {
    pub citizen: CitizenRecord,
    pub verification: VerificationResponse,
}

/// Build the citizens router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/citizens", post(register_citizen))
        .route("/v1/citizens/{id}", get(get_citizen))
        .route("/v1/citizens/{id}/verify-identity", post(verify_citizen_identity))
}

/// POST /v1/citizens: Register a citizen.
#[utoipa::path(
    post,
    path = "/v1/citizens",
    request_body = RegisterCitizenRequest,
    responses(
        (status = 201, description = "Citizen registered", body = CitizenRecord),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 409, description = "Identity number already registered", body = crate::error::ErrorBody),
        (status = 422, description = "Identity number, mobile or name rejected", body = crate::error::ErrorBody),
        (status = 503, description = "Identity authority not available", body = crate::error::ErrorBody),
    ),
    tag = "citizens"
)]
pub(crate) async fn register_citizen(
    State(state): State<AppState>,
    body: Result<Json<RegisterCitizenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CitizenRecord>), AppError> {
    let req = extract_validated_json(body)?;
    let identity_number = validate_format(&req.identity_number)?;
    let mobile = MobileNumber::new(&req.mobile)?;

    if state.citizens.is_registered(&identity_number) {
        return Err(RegistryError::AlreadyRegistered(identity_number.masked()).into());
    }

    let outcome = state
        .verifier
        .verify_number(&identity_number, req.otp.as_deref())?;

    let record = state.citizens.register(NewCitizen {
        full_name: req.full_name.trim().to_string(),
        identity_number,
        mobile,
        email: req
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty()),
        verified_at: outcome.verified_at,
    })?;

    tracing::info!(
        citizen_id = %record.id,
        consumer_id = %record.consumer_id,
        identity = %record.identity_number_masked,
        verified = record.identity_verified,
        "citizen registered"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/citizens/{id}: Fetch a citizen record.
#[utoipa::path(
    get,
    path = "/v1/citizens/{id}",
    params(("id" = Uuid, Path, description = "Citizen ID")),
    responses(
        (status = 200, description = "Citizen found", body = CitizenRecord),
        (status = 404, description = "Citizen not found", body = crate::error::ErrorBody),
    ),
    tag = "citizens"
)]
pub(crate) async fn get_citizen(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CitizenRecord>, AppError> {
    state
        .citizens
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("citizen {id} not found")))
}

/// POST /v1/citizens/{id}/verify-identity: Re-verify a registered identity.
#[utoipa::path(
    post,
    path = "/v1/citizens/{id}/verify-identity",
    params(("id" = Uuid, Path, description = "Citizen ID")),
    request_body(content = VerifyCitizenRequest, description = "Optional; omit when no OTP is supplied"),
    responses(
        (status = 200, description = "Verification recorded", body = CitizenVerificationResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 404, description = "Citizen not found", body = crate::error::ErrorBody),
        (status = 503, description = "Identity authority not available", body = crate::error::ErrorBody),
    ),
    tag = "citizens"
)]
pub(crate) async fn verify_citizen_identity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<CitizenVerificationResponse>, AppError> {
    let req: VerifyCitizenRequest = extract_optional_json(&body)?;
    let stored = state
        .citizens
        .identity_number(&id)
        .ok_or_else(|| AppError::NotFound(format!("citizen {id} not found")))?;

    // Profile verification applies the registration rules.
    let identity_number = validate_format(stored.as_str())?;
    let outcome = state
        .verifier
        .verify_number(&identity_number, req.otp.as_deref())?;

    let citizen = state
        .citizens
        .record_verification(&id, outcome.verified_at)
        .ok_or_else(|| AppError::NotFound(format!("citizen {id} not found")))?;

    tracing::info!(
        citizen_id = %id,
        identity = %identity_number,
        verified = outcome.verified,
        "citizen identity re-verified"
    );
    Ok(Json(CitizenVerificationResponse {
        citizen,
        verification: VerificationResponse::new(outcome, true),
    }))
}
