//! # Identity Newtypes
//!
//! Validated domain primitives for citizen identity.
//!
//! ## Validation
//!
//! [`IdentityNumber`] runs the full five-step validation at construction:
//!
//! 1. strip every space and hyphen,
//! 2. require exactly 12 ASCII digits,
//! 3. reject a leading `0` or `1`,
//! 4. reject a single digit repeated 12 times,
//! 5. require a Verhoeff checksum of 0.
//!
//! Steps 2-4 fail with [`ValidationError::InvalidFormat`]; step 5 fails with
//! [`ValidationError::ChecksumMismatch`]. The checksum is only reached once
//! the input is known to be 12 digits.
//!
//! ## Privacy
//!
//! `Display` and `Debug` of an [`IdentityNumber`] print the masked form
//! `XXXX-XXXX-dddd`. Use [`IdentityNumber::as_str`] where the full value is
//! genuinely needed (persistence, uniqueness checks).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FormatViolation, InvalidMobileNumber, ValidationError, ValidationReason};
use crate::verhoeff;

/// Number of digits in a national identity number.
pub const IDENTITY_NUMBER_LEN: usize = 12;

/// Remove the separators citizens type between digit groups.
fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Validate a raw identity number and return the cleaned value.
///
/// Accepts `"2341 2341 2346"`, `"2341-2341-2346"` and `"234123412346"`
/// identically. Pure and deterministic; never panics on any input.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] carrying the broken structural
/// rule, or [`ValidationError::ChecksumMismatch`] if the digits are well
/// formed but the Verhoeff checksum fails.
pub fn validate_format(raw: &str) -> Result<IdentityNumber, ValidationError> {
    let cleaned = strip_separators(raw);
    let bytes = cleaned.as_bytes();

    if bytes.len() != IDENTITY_NUMBER_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(FormatViolation::Length.into());
    }

    let first = bytes[0];
    if first == b'0' || first == b'1' {
        return Err(FormatViolation::ReservedLeadingDigit.into());
    }

    if bytes.iter().all(|b| *b == first) {
        return Err(FormatViolation::RepeatedDigit.into());
    }

    if verhoeff::checksum(&cleaned) != Some(0) {
        return Err(ValidationError::ChecksumMismatch);
    }

    Ok(IdentityNumber(cleaned))
}

/// A 12-digit national identity number that passed format and checksum
/// validation.
///
/// Serialized as the bare 12-digit string. Deserialization re-runs
/// [`validate_format`], so a stored value that no longer validates is
/// rejected on load.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityNumber(String);

impl IdentityNumber {
    /// Parse and validate an identity number. Alias for [`validate_format`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_format(raw.as_ref())
    }

    /// The cleaned 12-digit value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last four digits, which are safe to show back to the citizen.
    pub fn last_four(&self) -> &str {
        &self.0[IDENTITY_NUMBER_LEN - 4..]
    }

    /// Masked form for receipts and logs: `XXXX-XXXX-dddd`.
    pub fn masked(&self) -> String {
        format!("XXXX-XXXX-{}", self.last_four())
    }

    /// Space-grouped form as printed on the card: `dddd dddd dddd`.
    pub fn grouped(&self) -> String {
        format!("{} {} {}", &self.0[..4], &self.0[4..8], &self.0[8..])
    }
}

impl FromStr for IdentityNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_format(s)
    }
}

impl TryFrom<String> for IdentityNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_format(&value)
    }
}

impl From<IdentityNumber> for String {
    fn from(value: IdentityNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.masked())
    }
}

impl std::fmt::Debug for IdentityNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IdentityNumber").field(&self.masked()).finish()
    }
}

/// Wire form of a validation outcome.
///
/// ```json
/// { "valid": true,  "cleaned": "234123412346", "message": "..." }
/// { "valid": false, "reason": "InvalidFormat", "violation": "length", "message": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the input is a well-formed, checksum-valid identity number.
    pub valid: bool,
    /// The cleaned 12-digit value, present only when valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaned: Option<String>,
    /// Stable reason code, present only when invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ValidationReason>,
    /// Structural sub-reason, present only for format failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<FormatViolation>,
    /// Human-readable message suitable for direct display.
    pub message: String,
}

impl ValidationReport {
    /// Validate `raw` and describe the outcome.
    pub fn of(raw: &str) -> Self {
        Self::from(validate_format(raw))
    }
}

impl From<Result<IdentityNumber, ValidationError>> for ValidationReport {
    fn from(result: Result<IdentityNumber, ValidationError>) -> Self {
        match result {
            Ok(number) => Self {
                valid: true,
                cleaned: Some(number.0),
                reason: None,
                violation: None,
                message: "identity number is valid".to_string(),
            },
            Err(err) => Self::from(err),
        }
    }
}

impl From<ValidationError> for ValidationReport {
    fn from(err: ValidationError) -> Self {
        Self {
            valid: false,
            cleaned: None,
            reason: Some(err.reason()),
            violation: err.violation(),
            message: err.to_string(),
        }
    }
}

/// A 10-digit mobile subscriber number.
///
/// # Validation
///
/// - Whitespace, hyphens and a leading `+91` country code are stripped
/// - Must then be exactly 10 ASCII digits
/// - First digit must be 6, 7, 8 or 9
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Create a mobile number, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMobileNumber`] carrying the original input.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidMobileNumber> {
        let raw = value.into();
        let stripped = strip_separators(&raw);
        let digits = stripped.strip_prefix("+91").unwrap_or(&stripped);

        let well_formed = digits.len() == 10
            && digits.bytes().all(|b| b.is_ascii_digit())
            && matches!(digits.as_bytes()[0], b'6'..=b'9');
        if !well_formed {
            return Err(InvalidMobileNumber(raw));
        }
        Ok(Self(digits.to_string()))
    }

    /// Access the 10-digit value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = InvalidMobileNumber;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MobileNumber> for String {
    fn from(value: MobileNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
