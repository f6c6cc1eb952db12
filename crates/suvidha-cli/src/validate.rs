//! # Validate and Check-Digit Subcommands
//!
//! `suvidha validate` runs each argument through the kiosk's identity-number
//! validation and prints one line (or one JSON object) per input.
//! `suvidha check-digit` completes an 11-digit payload with its Verhoeff
//! check digit.
//!
//! Valid numbers are printed masked; rejected inputs are echoed as given,
//! since they are not identity numbers.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Args;

use suvidha_core::verhoeff;
use suvidha_core::{validate_format, ValidationReport};

/// Arguments for the `suvidha validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Identity numbers to validate. Spaces and hyphens are allowed.
    #[arg(value_name = "NUMBER", required = true)]
    pub numbers: Vec<String>,

    /// Print one JSON report per line instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `suvidha check-digit` subcommand.
#[derive(Args, Debug)]
pub struct CheckDigitArgs {
    /// The first 11 digits of an identity number.
    #[arg(value_name = "PAYLOAD")]
    pub payload: String,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if every number is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<u8> {
    let mut rejected = 0usize;

    for raw in &args.numbers {
        let result = validate_format(raw);
        if result.is_err() {
            rejected += 1;
        }

        if args.json {
            let report = ValidationReport::from(result);
            let line = serde_json::to_string(&report).context("failed to encode report")?;
            writeln!(out, "{line}")?;
            continue;
        }

        match result {
            Ok(number) => writeln!(out, "OK    {}", number.masked())?,
            Err(err) => writeln!(out, "FAIL  {raw}: {err} ({})", err.reason())?,
        }
    }

    tracing::info!(
        total = args.numbers.len(),
        rejected,
        "validation complete"
    );

    Ok(if rejected == 0 { 0 } else { 1 })
}

/// Execute the check-digit subcommand.
///
/// Returns exit code 0 on success.
///
/// # Errors
///
/// Fails if the payload is not 11 digits; `main` maps the error to exit
/// code 2.
pub fn run_check_digit(args: &CheckDigitArgs, out: &mut impl Write) -> Result<u8> {
    let payload: String = args
        .payload
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    let digit = if payload.len() == 11 {
        verhoeff::check_digit(&payload)
    } else {
        None
    };
    let Some(digit) = digit else {
        bail!("payload must be exactly 11 digits, got \"{}\"", args.payload);
    };

    let completed = format!("{payload}{digit}");
    writeln!(out, "check digit: {digit}")?;
    writeln!(out, "number:      {completed}")?;

    if let Err(err) = validate_format(&completed) {
        tracing::warn!("completed number would still be rejected: {err}");
    }
    Ok(0)
}
