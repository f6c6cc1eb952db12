//! # Identity Verifier
//!
//! Routes verification requests according to the configured
//! [`VerificationMode`]. Local format and checksum validation always runs
//! first; authorities only see numbers that passed it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use suvidha_core::{validate_format, IdentityNumber, ValidationError};
use uuid::Uuid;

use crate::authority::{
    AuthorityError, AuthorityResponse, IdentityAuthority, SandboxAuthority, VerificationRequest,
};
use crate::config::{VerificationMode, VerifierConfig};

/// Errors from [`IdentityVerifier::verify`].
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    /// The number failed local validation; no authority was contacted.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The authority could not complete the request.
    #[error(transparent)]
    Authority(#[from] AuthorityError),
}

/// Result of a verification attempt.
///
/// Carries only the masked number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the identity was confirmed by an authority.
    pub verified: bool,
    /// Mode that produced this outcome.
    pub mode: VerificationMode,
    /// Masked identity number (`XXXX-XXXX-dddd`).
    pub masked_number: String,
    /// Human-readable summary.
    pub message: String,
    /// Name on record, if the authority disclosed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// When the authority confirmed the identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    /// Authority reference for the attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl VerificationOutcome {
    fn from_authority(
        mode: VerificationMode,
        number: &IdentityNumber,
        response: AuthorityResponse,
    ) -> Self {
        let message = match (response.verified, mode) {
            (true, VerificationMode::Sandbox) => "identity verification successful (sandbox mode)",
            (true, VerificationMode::Production) => "identity verification successful",
            (false, _) => "identity authority did not confirm this identity",
        };
        Self {
            verified: response.verified,
            mode,
            masked_number: number.masked(),
            message: message.to_string(),
            name: response.name,
            verified_at: response.verified.then_some(response.verified_at),
            reference: Some(response.reference),
        }
    }

    fn format_only(number: &IdentityNumber) -> Self {
        Self {
            verified: false,
            mode: VerificationMode::Production,
            masked_number: number.masked(),
            message: "identity number format valid; OTP verification required for full verification"
                .to_string(),
            name: None,
            verified_at: None,
            reference: None,
        }
    }
}

/// Verification service shared by request handlers.
#[derive(Clone)]
pub struct IdentityVerifier {
    mode: VerificationMode,
    sandbox: SandboxAuthority,
    live: Option<Arc<dyn IdentityAuthority>>,
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("mode", &self.mode)
            .field(
                "live",
                &self.live.as_ref().map(|a| a.authority_name().to_string()),
            )
            .finish()
    }
}

impl Default for IdentityVerifier {
    fn default() -> Self {
        Self::new(VerifierConfig::default())
    }
}

impl IdentityVerifier {
    /// Create a verifier with no live authority attached.
    pub fn new(config: VerifierConfig) -> Self {
        Self {
            mode: config.mode,
            sandbox: SandboxAuthority,
            live: None,
        }
    }

    /// Attach the authority used for OTP verification in production mode.
    pub fn with_live_authority(mut self, authority: Arc<dyn IdentityAuthority>) -> Self {
        self.live = Some(authority);
        self
    }

    /// The configured mode.
    pub fn mode(&self) -> VerificationMode {
        self.mode
    }

    /// Validate `raw` locally, then verify it according to the mode.
    ///
    /// # Errors
    ///
    /// [`VerificationError::Invalid`] if local validation fails;
    /// [`VerificationError::Authority`] if the authority cannot complete.
    pub fn verify(
        &self,
        raw: &str,
        otp: Option<&str>,
    ) -> Result<VerificationOutcome, VerificationError> {
        let number = validate_format(raw)?;
        Ok(self.verify_number(&number, otp)?)
    }

    /// Verify an already-validated number according to the mode.
    pub fn verify_number(
        &self,
        number: &IdentityNumber,
        otp: Option<&str>,
    ) -> Result<VerificationOutcome, AuthorityError> {
        let otp = otp.map(str::trim).filter(|o| !o.is_empty());

        match (self.mode, otp) {
            (VerificationMode::Sandbox, _) => {
                let response = self.sandbox.verify(&request(number, None))?;
                tracing::debug!(identity = %number, "sandbox verification");
                Ok(VerificationOutcome::from_authority(self.mode, number, response))
            }
            (VerificationMode::Production, Some(otp)) => {
                let authority = self.live.as_ref().ok_or_else(|| AuthorityError::NotConfigured {
                    reason: "production mode requires a live identity authority".to_string(),
                })?;
                let response = authority.verify(&request(number, Some(otp)))?;
                tracing::info!(
                    identity = %number,
                    authority = authority.authority_name(),
                    verified = response.verified,
                    "identity authority responded"
                );
                Ok(VerificationOutcome::from_authority(self.mode, number, response))
            }
            (VerificationMode::Production, None) => Ok(VerificationOutcome::format_only(number)),
        }
    }
}

fn request(number: &IdentityNumber, otp: Option<&str>) -> VerificationRequest {
    VerificationRequest {
        identity_number: number.clone(),
        otp: otp.map(str::to_string),
        request_reference: Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suvidha_core::FormatViolation;

    const VALID: &str = "2341 2341 2346";

    /// Authority that accepts exactly one OTP.
    struct FixedOtpAuthority {
        otp: &'static str,
    }

    impl IdentityAuthority for FixedOtpAuthority {
        fn verify(
            &self,
            request: &VerificationRequest,
        ) -> Result<AuthorityResponse, AuthorityError> {
            Ok(AuthorityResponse {
                verified: request.otp.as_deref() == Some(self.otp),
                name: Some("Test Citizen".to_string()),
                verified_at: Utc::now(),
                reference: request.request_reference.clone(),
            })
        }

        fn authority_name(&self) -> &str {
            "FixedOtpAuthority"
        }
    }

    fn production() -> IdentityVerifier {
        IdentityVerifier::new(VerifierConfig {
            mode: VerificationMode::Production,
        })
    }

    #[test]
    fn sandbox_verifies_valid_number() {
        let outcome = IdentityVerifier::default().verify(VALID, None).unwrap();
        assert!(outcome.verified);
        assert_eq!(outcome.mode, VerificationMode::Sandbox);
        assert_eq!(outcome.masked_number, "XXXX-XXXX-2346");
        assert!(outcome.verified_at.is_some());
        assert!(outcome.message.contains("sandbox"));
    }

    #[test]
    fn invalid_number_never_reaches_authority() {
        let err = IdentityVerifier::default()
            .verify("123412341234", None)
            .unwrap_err();
        match err {
            VerificationError::Invalid(ValidationError::InvalidFormat(v)) => {
                assert_eq!(v, FormatViolation::ReservedLeadingDigit)
            }
            other => panic!("expected format failure, got {other:?}"),
        }
    }

    #[test]
    fn checksum_failure_is_reported() {
        let err = IdentityVerifier::default()
            .verify("234123412345", None)
            .unwrap_err();
        assert!(matches!(
            err,
            VerificationError::Invalid(ValidationError::ChecksumMismatch)
        ));
    }

    #[test]
    fn production_without_otp_is_format_only() {
        let outcome = production().verify(VALID, None).unwrap();
        assert!(!outcome.verified);
        assert_eq!(outcome.mode, VerificationMode::Production);
        assert!(outcome.message.contains("OTP"));
        assert!(outcome.reference.is_none());
    }

    #[test]
    fn blank_otp_counts_as_absent() {
        let outcome = production().verify(VALID, Some("   ")).unwrap();
        assert!(!outcome.verified);
    }

    #[test]
    fn production_with_otp_but_no_authority_is_not_configured() {
        let err = production().verify(VALID, Some("123456")).unwrap_err();
        assert!(matches!(
            err,
            VerificationError::Authority(AuthorityError::NotConfigured { .. })
        ));
    }

    #[test]
    fn production_delegates_to_live_authority() {
        let verifier =
            production().with_live_authority(Arc::new(FixedOtpAuthority { otp: "424242" }));

        let ok = verifier.verify(VALID, Some("424242")).unwrap();
        assert!(ok.verified);
        assert_eq!(ok.name.as_deref(), Some("Test Citizen"));

        let wrong = verifier.verify(VALID, Some("000000")).unwrap();
        assert!(!wrong.verified);
        assert!(wrong.verified_at.is_none());
    }

    #[test]
    fn debug_names_live_authority() {
        let verifier =
            production().with_live_authority(Arc::new(FixedOtpAuthority { otp: "1" }));
        assert!(format!("{verifier:?}").contains("FixedOtpAuthority"));
    }

    #[test]
    fn outcome_never_serializes_full_number() {
        let outcome = IdentityVerifier::default().verify(VALID, None).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(!json.contains("234123412346"));
        assert!(json.contains("XXXX-XXXX-2346"));
    }
}
