//! CPF (Cadastro de Pessoas Físicas) validation
//!
//! A CPF is 11 digits: a 9-digit base followed by two check digits.
//! Each check digit is a weighted sum modulo 11 over the digits before it:
//!
//! - first:  weights 10..=2 over digits 1-9
//! - second: weights 11..=2 over digits 1-10
//!
//! A remainder below 2 yields 0, anything else yields `11 - remainder`.
//! Punctuation is ignored, so `"111.444.777-35"` and `"11144477735"`
//! name the same CPF.

use std::fmt;

/// Number of digits in a normalized CPF.
pub const CPF_LEN: usize = 11;

/// Strips every character that is not an ASCII digit.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns true if `input` is a structurally and arithmetically valid CPF.
///
/// Rejects anything whose normalized form is not exactly 11 digits, and
/// the repeated-digit sequences ("00000000000", "11111111111", ...) which
/// satisfy the arithmetic but are never issued.
pub fn is_valid(input: &str) -> bool {
    let digits: Vec<u32> = input
        .chars()
        .filter(char::is_ascii_digit)
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() != CPF_LEN {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let first = check_digit(&digits[..9]);
    let second = check_digit(&digits[..10]);

    digits[9] == first && digits[10] == second
}

/// Computes the check digit for `digits`.
///
/// Weights start at `digits.len() + 1` and descend to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(d, w)| d * w)
        .sum();

    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// A validated, normalized CPF.
///
/// Holding a `Cpf` proves the value passed [`is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Parses and normalizes `input`, returning `None` if it is not a valid CPF.
    pub fn parse(input: &str) -> Option<Self> {
        if is_valid(input) {
            Some(Self(normalize(input)))
        } else {
            None
        }
    }

    /// The 11 digits, without punctuation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if `other` normalizes to this CPF.
    pub fn matches(&self, other: &str) -> bool {
        normalize(other) == self.0
    }

    /// Renders the conventional `000.000.000-00` form.
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
