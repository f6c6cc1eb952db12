//! # suvidha-cli: Operator CLI for the Suvidha Kiosk
//!
//! Provides the `suvidha` command-line interface for support staff and
//! batch checks outside the kiosk UI.
//!
//! ## Subcommands
//!
//! - `suvidha validate`: Validate one or more identity numbers.
//! - `suvidha check-digit`: Compute the Verhoeff check digit for an
//!   11-digit payload.
//!
//! ```bash
//! suvidha validate "2341 2341 2346" 234123412345
//! suvidha validate --json 2341-2341-2346
//! suvidha check-digit 23412341234
//! ```
//!
//! Exit codes: 0 success, 1 at least one number rejected, 2 bad input.

pub mod validate;
