//! # Verhoeff Checksum
//!
//! The dihedral-group (D5) check-digit scheme used by the national identity
//! authority. It detects every single-digit substitution and every
//! transposition of adjacent digits.
//!
//! ## Algorithm
//!
//! Digits are consumed right-to-left. For the 0-based position `i` (counted
//! from the rightmost digit) holding digit `v`, the accumulator advances as
//!
//! ```text
//! c := D[c][P[i mod 8][v]]
//! ```
//!
//! starting from `c = 0`. A number is valid iff the final `c` is 0.
//!
//! The tables below must match the published constants exactly. Any change
//! alters acceptance of real-world numbers.

/// Multiplication table of the dihedral group D5.
pub const D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Position-dependent permutations, indexed by position modulo 8.
pub const P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// Group inverses in D5, used only when generating a check digit.
pub const INV: [u8; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

/// Run the accumulator over `digits` with every position shifted by `offset`.
///
/// Returns `None` if any byte is not an ASCII digit.
fn accumulate(digits: &str, offset: usize) -> Option<u8> {
    let mut c: u8 = 0;
    for (i, byte) in digits.bytes().rev().enumerate() {
        if !byte.is_ascii_digit() {
            return None;
        }
        let v = usize::from(byte - b'0');
        let permuted = P[(i + offset) % 8][v];
        c = D[usize::from(c)][usize::from(permuted)];
    }
    Some(c)
}

/// Compute the Verhoeff residue of a digit string.
///
/// Returns `None` if `digits` contains anything other than ASCII digits.
/// A residue of 0 means the string carries a correct check digit.
pub fn checksum(digits: &str) -> Option<u8> {
    accumulate(digits, 0)
}

/// Whether a non-empty digit string carries a correct Verhoeff check digit.
pub fn is_valid(digits: &str) -> bool {
    !digits.is_empty() && checksum(digits) == Some(0)
}

/// Compute the check digit that, appended to `payload`, makes it valid.
///
/// Returns `None` if `payload` contains anything other than ASCII digits.
pub fn check_digit(payload: &str) -> Option<u8> {
    accumulate(payload, 1).map(|c| INV[usize::from(c)])
}
