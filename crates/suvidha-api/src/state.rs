//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! - **Citizen registry**: in-memory record of registered citizens, keyed
//!   by record ID with a uniqueness index on the identity number. This is
//!   the kiosk's demo-mode store; a relational backend would replace it
//!   behind the same methods.
//! - **Identity verifier**: routes verification to the sandbox or a live
//!   identity authority.
//! - **Configuration**: port, auth token, verification mode.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use suvidha_core::{IdentityNumber, MobileNumber};
use suvidha_identity::{IdentityVerifier, VerifierConfig};
use utoipa::ToSchema;
use uuid::Uuid;

// -- Citizen Records ----------------------------------------------------------

/// Lifecycle status of a citizen account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CitizenStatus {
    /// Registered, identity not yet confirmed by an authority.
    PendingVerification,
    /// Identity confirmed; the account can use kiosk services.
    Active,
}

/// Citizen record as returned by the API.
///
/// Carries only the masked identity number.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CitizenRecord {
    pub id: Uuid,
    /// Kiosk login identifier, e.g. `SUV0000000001`.
    pub consumer_id: String,
    pub full_name: String,
    /// Identity number in `XXXX-XXXX-dddd` form.
    pub identity_number_masked: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub identity_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_verified_at: Option<DateTime<Utc>>,
    pub status: CitizenStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for [`CitizenRegistry::register`].
#[derive(Debug, Clone)]
pub struct NewCitizen {
    pub full_name: String,
    pub identity_number: IdentityNumber,
    pub mobile: MobileNumber,
    pub email: Option<String>,
    /// When an authority confirmed the identity, if it did.
    pub verified_at: Option<DateTime<Utc>>,
}

/// Errors from the citizen registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Another citizen already holds this identity number.
    #[error("identity number {0} is already registered")]
    AlreadyRegistered(String),
}

impl From<RegistryError> for crate::error::AppError {
    fn from(err: RegistryError) -> Self {
        Self::Conflict(err.to_string())
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    records: HashMap<Uuid, CitizenRecord>,
    /// Full identity number → record ID.
    by_identity: HashMap<String, Uuid>,
    /// Record ID → full identity number.
    identities: HashMap<Uuid, IdentityNumber>,
    issued_consumer_ids: u64,
}

/// Thread-safe, cloneable citizen registry.
///
/// All operations are synchronous (the lock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await`. The
/// uniqueness check and the insert in [`register`](Self::register) run
/// under one write lock, so two concurrent registrations of the same
/// number cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct CitizenRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl CitizenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a citizen with this identity number exists.
    pub fn is_registered(&self, number: &IdentityNumber) -> bool {
        self.inner.read().by_identity.contains_key(number.as_str())
    }

    /// Register a citizen, enforcing identity-number uniqueness.
    pub fn register(&self, new: NewCitizen) -> Result<CitizenRecord, RegistryError> {
        let mut inner = self.inner.write();
        if inner.by_identity.contains_key(new.identity_number.as_str()) {
            return Err(RegistryError::AlreadyRegistered(new.identity_number.masked()));
        }

        inner.issued_consumer_ids += 1;
        let now = Utc::now();
        let id = Uuid::new_v4();
        let record = CitizenRecord {
            id,
            consumer_id: format!("SUV{:010}", inner.issued_consumer_ids),
            full_name: new.full_name,
            identity_number_masked: new.identity_number.masked(),
            mobile: new.mobile.as_str().to_string(),
            email: new.email,
            identity_verified: new.verified_at.is_some(),
            identity_verified_at: new.verified_at,
            status: if new.verified_at.is_some() {
                CitizenStatus::Active
            } else {
                CitizenStatus::PendingVerification
            },
            created_at: now,
            updated_at: now,
        };

        inner
            .by_identity
            .insert(new.identity_number.as_str().to_string(), id);
        inner.identities.insert(id, new.identity_number);
        inner.records.insert(id, record.clone());
        Ok(record)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<CitizenRecord> {
        self.inner.read().records.get(id).cloned()
    }

    /// The full identity number held for a record.
    pub fn identity_number(&self, id: &Uuid) -> Option<IdentityNumber> {
        self.inner.read().identities.get(id).cloned()
    }

    /// Record the outcome of an identity verification.
    ///
    /// A confirmed verification activates the account; a failed one leaves
    /// it as it was. Returns `None` if the record does not exist.
    pub fn record_verification(
        &self,
        id: &Uuid,
        verified_at: Option<DateTime<Utc>>,
    ) -> Option<CitizenRecord> {
        let mut inner = self.inner.write();
        let record = inner.records.get_mut(id)?;
        if let Some(at) = verified_at {
            record.identity_verified = true;
            record.identity_verified_at = Some(at);
            record.status = CitizenStatus::Active;
        }
        record.updated_at = Utc::now();
        Some(record.clone())
    }

    /// Number of registered citizens.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -- Configuration ------------------------------------------------------------

/// Application configuration.
///
/// Custom `Debug` redacts the auth token.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token. If `None`, authentication is disabled.
    pub auth_token: Option<String>,
    /// Identity verification settings.
    pub verifier: VerifierConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("verifier", &self.verifier)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            verifier: VerifierConfig::default(),
        }
    }
}

/// Error loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT \"{0}\"")]
    InvalidPort(String),
    #[error(transparent)]
    Verifier(#[from] suvidha_identity::ConfigError),
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `AUTH_TOKEN` (optional; unset or empty disables authentication)
    /// - `IDENTITY_API_MODE` (`sandbox` | `production`, default: `sandbox`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => 8080,
        };
        let auth_token = std::env::var("AUTH_TOKEN").ok().filter(|t| !t.is_empty());
        Ok(Self {
            port,
            auth_token,
            verifier: VerifierConfig::from_env()?,
        })
    }
}

// -- AppState -----------------------------------------------------------------

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub citizens: CitizenRegistry,
    pub verifier: IdentityVerifier,
    pub config: AppConfig,
}

impl AppState {
    /// Create state with default configuration (sandbox, no auth).
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create state with the given configuration and no live authority.
    pub fn with_config(config: AppConfig) -> Self {
        let verifier = IdentityVerifier::new(config.verifier.clone());
        Self::with_verifier(config, verifier)
    }

    /// Create state with an explicitly constructed verifier.
    pub fn with_verifier(config: AppConfig, verifier: IdentityVerifier) -> Self {
        Self {
            citizens: CitizenRegistry::new(),
            verifier,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
