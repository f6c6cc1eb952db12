//! # suvidha-core: Foundational Types for the Kiosk
//!
//! Defines the domain primitives every other crate in the workspace builds
//! on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes.** [`IdentityNumber`] and [`MobileNumber`] can only
//!    be constructed through their validating constructors. Holding one is
//!    proof the value passed every rule.
//!
//! 2. **Validation failure is data.** [`validate_format`] returns a
//!    `Result` whose error carries a stable reason code and a distinct
//!    message per failure case. Callers map it to UI feedback.
//!
//! 3. **The checksum tables are constants.** [`verhoeff`] holds the
//!    dihedral-group tables as `const` arrays; there is no shared mutable
//!    state anywhere in this crate.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `suvidha-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod verhoeff;

// Re-export primary types for ergonomic imports.
pub use error::{FormatViolation, InvalidMobileNumber, ValidationError, ValidationReason};
pub use identity::{validate_format, IdentityNumber, MobileNumber, ValidationReport};
