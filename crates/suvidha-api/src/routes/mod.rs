//! # API Route Modules
//!
//! - `identity`: identity-number validation and verification for the
//!   registration form.
//! - `citizens`: citizen registration, lookup, and profile re-verification.

pub mod citizens;
pub mod identity;
