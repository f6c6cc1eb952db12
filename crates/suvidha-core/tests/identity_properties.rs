//! # Property Tests for Identity-Number Validation
//!
//! Exercises the error-detection guarantees of the Verhoeff scheme and the
//! normalization rules of `validate_format` over generated inputs.

use proptest::prelude::*;
use suvidha_core::error::{FormatViolation, ValidationError};
use suvidha_core::{validate_format, verhoeff};

/// Strategy for checksum-valid, structurally valid 12-digit numbers.
fn valid_identity_number() -> impl Strategy<Value = String> {
    "[2-9][0-9]{10}".prop_filter_map("repeated digit", |payload| {
        let digit = verhoeff::check_digit(&payload)?;
        let number = format!("{payload}{digit}");
        let first = number.as_bytes()[0];
        if number.bytes().all(|b| b == first) {
            None
        } else {
            Some(number)
        }
    })
}

fn is_structurally_valid(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes[0] >= b'2' && !bytes.iter().all(|b| *b == bytes[0])
}

proptest! {
    /// A payload completed with its check digit always validates.
    #[test]
    fn minted_numbers_validate(number in valid_identity_number()) {
        let id = validate_format(&number);
        prop_assert!(id.is_ok(), "{} rejected: {:?}", number, id.err());
        let id = id.unwrap();
        prop_assert_eq!(id.as_str(), number.as_str());
    }

    /// Every single-digit substitution is detected.
    #[test]
    fn single_digit_substitution_detected(
        number in valid_identity_number(),
        pos in 0usize..12,
        delta in 1u8..10,
    ) {
        let mut bytes = number.clone().into_bytes();
        bytes[pos] = b'0' + (bytes[pos] - b'0' + delta) % 10;
        let mutated = String::from_utf8(bytes).unwrap();

        let result = validate_format(&mutated);
        prop_assert!(result.is_err(), "{} -> {} accepted", number, mutated);
        if is_structurally_valid(&mutated) {
            prop_assert_eq!(result.unwrap_err(), ValidationError::ChecksumMismatch);
        }
    }

    /// Every transposition of two distinct adjacent digits is detected.
    #[test]
    fn adjacent_transposition_detected(number in valid_identity_number(), pos in 0usize..11) {
        let mut bytes = number.clone().into_bytes();
        prop_assume!(bytes[pos] != bytes[pos + 1]);
        bytes.swap(pos, pos + 1);
        let mutated = String::from_utf8(bytes).unwrap();

        prop_assert!(validate_format(&mutated).is_err(), "{} -> {} accepted", number, mutated);
    }

    /// Validating the cleaned output again yields the same result.
    #[test]
    fn validation_is_idempotent(number in valid_identity_number()) {
        let grouped = format!("{} {}-{}", &number[..4], &number[4..8], &number[8..]);
        let first = validate_format(&grouped).unwrap();
        let second = validate_format(first.as_str()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Hyphen, space and bare forms of the same digits are indistinguishable.
    #[test]
    fn separators_do_not_matter(digits in "[0-9]{12}") {
        let hyphenated = format!("{}-{}-{}", &digits[..4], &digits[4..8], &digits[8..]);
        let spaced = format!("{} {} {}", &digits[..4], &digits[4..8], &digits[8..]);
        let bare = validate_format(&digits);
        prop_assert_eq!(&validate_format(&hyphenated), &bare);
        prop_assert_eq!(&validate_format(&spaced), &bare);
    }

    /// A reserved leading digit is rejected whatever the checksum says.
    #[test]
    fn reserved_leading_digit_rejected(lead in "[01]", rest in "[0-9]{10}") {
        let payload = format!("{lead}{rest}");
        let digit = verhoeff::check_digit(&payload).unwrap();
        let number = format!("{payload}{digit}");
        prop_assert_eq!(
            validate_format(&number),
            Err(ValidationError::InvalidFormat(FormatViolation::ReservedLeadingDigit))
        );
    }

    /// Any digit string that is not 12 long is a length failure.
    #[test]
    fn wrong_length_rejected(digits in "[2-9][0-9]{0,10}|[2-9][0-9]{12,20}") {
        prop_assert_eq!(
            validate_format(&digits),
            Err(ValidationError::InvalidFormat(FormatViolation::Length))
        );
    }

    /// Validation never panics, whatever the input.
    #[test]
    fn arbitrary_input_never_panics(raw in "\\PC{0,32}") {
        let _ = validate_format(&raw);
    }
}

#[test]
fn repeated_digits_rejected_for_every_digit() {
    for d in 2..=9u8 {
        let number = char::from(b'0' + d).to_string().repeat(12);
        assert_eq!(
            validate_format(&number),
            Err(ValidationError::InvalidFormat(FormatViolation::RepeatedDigit)),
            "{number}"
        );
    }
}

#[test]
fn known_vector_rejects_all_nine_alternate_last_digits() {
    assert!(validate_format("234123412346").is_ok());
    let rejected = (0..=9u8)
        .filter(|d| *d != 6)
        .filter(|d| {
            validate_format(&format!("23412341234{d}")) == Err(ValidationError::ChecksumMismatch)
        })
        .count();
    assert_eq!(rejected, 9);
}
