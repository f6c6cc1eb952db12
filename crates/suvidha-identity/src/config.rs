//! Verifier configuration.
//!
//! The verification mode is read from `IDENTITY_API_MODE` and defaults to
//! sandbox, so a fresh deployment never calls a live authority by accident.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable selecting the verification mode.
pub const MODE_ENV_VAR: &str = "IDENTITY_API_MODE";

/// How verification requests are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMode {
    /// Simulated authority; every valid number verifies.
    #[default]
    Sandbox,
    /// Live authority; full verification needs an OTP.
    Production,
}

impl VerificationMode {
    /// Return the configuration string for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Configuration for an [`IdentityVerifier`](crate::IdentityVerifier).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Verification mode.
    pub mode: VerificationMode,
}

impl VerifierConfig {
    /// Load configuration from the environment.
    ///
    /// Variables:
    /// - `IDENTITY_API_MODE` (`sandbox` | `production`, default: `sandbox`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_mode_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    fn from_mode_value(value: Option<&str>) -> Result<Self, ConfigError> {
        let mode = match value {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => VerificationMode::default(),
        };
        Ok(Self { mode })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown identity verification mode \"{0}\" (expected sandbox or production)")]
    UnknownMode(String),
}
