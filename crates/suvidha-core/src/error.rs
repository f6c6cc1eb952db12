//! # Error Types
//!
//! Structured validation errors for the kiosk's domain primitives, built
//! with `thiserror`.
//!
//! Identity-number failures are split into a stable reason code
//! ([`ValidationReason`]) and, for structural problems, a sub-reason
//! ([`FormatViolation`]). The `Display` text of each variant is the
//! human-readable message shown to the citizen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural rule an identity number broke before the checksum was reached.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatViolation {
    /// Not exactly 12 ASCII digits after separators were stripped.
    #[error("identity number must be exactly 12 digits")]
    Length,

    /// First digit is `0` or `1`; those are never issued.
    #[error("identity number cannot start with 0 or 1")]
    ReservedLeadingDigit,

    /// All 12 digits are the same.
    #[error("identity number cannot be a single repeated digit")]
    RepeatedDigit,
}

impl FormatViolation {
    /// Return the sub-reason code as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::ReservedLeadingDigit => "reserved_leading_digit",
            Self::RepeatedDigit => "repeated_digit",
        }
    }
}

/// Stable, machine-readable reason code for a rejected identity number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationReason {
    /// Wrong length, non-digit characters, reserved leading digit, or a
    /// repeated-digit pattern.
    InvalidFormat,
    /// Structurally well formed, but the Verhoeff checksum is not zero.
    ChecksumMismatch,
}

impl ValidationReason {
    /// Return the reason code as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "InvalidFormat",
            Self::ChecksumMismatch => "ChecksumMismatch",
        }
    }
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason an identity number was rejected.
///
/// These are ordinary outcomes of validating untrusted input, so they are
/// `Copy` and cheap to return from a hot form-validation path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    /// A structural rule failed. The message names which one.
    #[error("{0}")]
    InvalidFormat(#[from] FormatViolation),

    /// The Verhoeff checksum of the 12 digits is not zero.
    #[error("identity number failed checksum verification")]
    ChecksumMismatch,
}

impl ValidationError {
    /// The stable reason code for this failure.
    pub fn reason(&self) -> ValidationReason {
        match self {
            Self::InvalidFormat(_) => ValidationReason::InvalidFormat,
            Self::ChecksumMismatch => ValidationReason::ChecksumMismatch,
        }
    }

    /// The structural sub-reason, if this is a format failure.
    pub fn violation(&self) -> Option<FormatViolation> {
        match self {
            Self::InvalidFormat(v) => Some(*v),
            Self::ChecksumMismatch => None,
        }
    }
}

/// Mobile number does not match the 10-digit subscriber format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid mobile number: \"{0}\" (expected 10 digits starting with 6-9)")]
pub struct InvalidMobileNumber(pub String);
