//! # suvidha-identity: Identity Verification
//!
//! Sits between the kiosk API and the national identity authority.
//! Every request is first checked locally with
//! [`suvidha_core::validate_format`]; only numbers that pass reach an
//! [`IdentityAuthority`].
//!
//! ## Modes
//!
//! | Mode         | OTP supplied | Result                                         |
//! |--------------|--------------|------------------------------------------------|
//! | `sandbox`    | ignored      | verified by [`SandboxAuthority`]               |
//! | `production` | yes          | delegated to the configured live authority     |
//! | `production` | no           | format-only: valid, but not verified           |
//!
//! A production verifier without a live authority reports
//! [`AuthorityError::NotConfigured`] when an OTP is presented.

pub mod authority;
pub mod config;
pub mod verifier;

pub use authority::{
    AuthorityError, AuthorityResponse, IdentityAuthority, SandboxAuthority, VerificationRequest,
};
pub use config::{ConfigError, VerificationMode, VerifierConfig};
pub use verifier::{IdentityVerifier, VerificationError, VerificationOutcome};
