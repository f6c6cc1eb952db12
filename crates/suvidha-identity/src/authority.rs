//! # Identity Authority Adapter Interface
//!
//! Abstracts over the backend that confirms an identity number belongs to
//! the person at the kiosk. Production deployments implement
//! [`IdentityAuthority`] against the authority's OTP-based e-KYC API;
//! development and tests use [`SandboxAuthority`].
//!
//! Requests only ever carry an already-validated
//! [`IdentityNumber`], so adapters never see malformed input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use suvidha_core::IdentityNumber;

/// Errors from identity authority operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// No live authority has been configured for this deployment.
    #[error("identity authority not configured: {reason}")]
    NotConfigured {
        /// Why configuration is missing or incomplete.
        reason: String,
    },

    /// The authority is unreachable or returned a 5xx status.
    #[error("identity authority unavailable: {reason}")]
    ServiceUnavailable {
        /// Human-readable description of the outage.
        reason: String,
    },

    /// The authority processed the request but rejected it (wrong OTP,
    /// number not on record, ...).
    #[error("verification failed: {reason}")]
    VerificationFailed {
        /// Description of the rejection.
        reason: String,
    },
}

/// Verification request sent to an authority.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    /// The validated identity number.
    pub identity_number: IdentityNumber,
    /// One-time password the citizen received from the authority.
    pub otp: Option<String>,
    /// Idempotency key for this attempt.
    pub request_reference: String,
}

/// Response from an authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityResponse {
    /// Whether the authority confirmed the identity.
    pub verified: bool,
    /// Name on record, when the authority discloses it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// When the authority performed the check.
    pub verified_at: DateTime<Utc>,
    /// Reference linking back to the request.
    pub reference: String,
}

/// Adapter trait for identity authorities.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// across request handlers behind an `Arc`. The trait is object-safe to
/// allow runtime selection of the adapter.
pub trait IdentityAuthority: Send + Sync {
    /// Confirm the identity described by `request`.
    fn verify(&self, request: &VerificationRequest) -> Result<AuthorityResponse, AuthorityError>;

    /// Human-readable name of the implementation, for logs.
    fn authority_name(&self) -> &str;
}

/// Authority used in sandbox mode.
///
/// Confirms every request. Local validation has already guaranteed the
/// number is well formed; the sandbox discloses no name.
#[derive(Debug, Clone, Default)]
pub struct SandboxAuthority;

impl IdentityAuthority for SandboxAuthority {
    fn verify(&self, request: &VerificationRequest) -> Result<AuthorityResponse, AuthorityError> {
        Ok(AuthorityResponse {
            verified: true,
            name: None,
            verified_at: Utc::now(),
            reference: format!("SANDBOX-{}", request.request_reference),
        })
    }

    fn authority_name(&self) -> &str {
        "SandboxAuthority"
    }
}
