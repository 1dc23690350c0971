//! CPF: individual taxpayer registry number.
//!
//! Nine base digits followed by two modulo-11 check digits. The second
//! digit is computed over the base plus the first check digit.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const LEN: usize = 11;

fn digits_of(raw: &str) -> Vec<u8> {
    raw.chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect()
}

/// Weighted modulo-11 digit over `digits`, weights descending from `first_weight`.
fn mod11_digit(digits: &[u8], first_weight: u32) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * (first_weight - i as u32))
        .sum();

    match sum % 11 {
        r if r < 2 => 0,
        r => (11 - r) as u8,
    }
}

/// Compute both check digits for a nine-digit base.
///
/// Formatting characters are ignored; returns `None` unless exactly nine
/// digits remain.
pub fn check_digits(base: &str) -> Option<(u8, u8)> {
    let mut digits = digits_of(base);
    if digits.len() != LEN - 2 {
        return None;
    }

    let first = mod11_digit(&digits, 10);
    digits.push(first);
    let second = mod11_digit(&digits, 11);
    Some((first, second))
}

/// Validate a CPF, ignoring any formatting characters.
pub fn validate(value: &str) -> bool {
    normalize(value).is_some()
}

fn normalize(raw: &str) -> Option<Vec<u8>> {
    let digits = digits_of(raw);
    if digits.len() != LEN {
        return None;
    }

    // Repeated digits satisfy the arithmetic but are never issued.
    if digits.iter().all(|d| *d == digits[0]) {
        return None;
    }

    if mod11_digit(&digits[..9], 10) != digits[9] {
        return None;
    }
    if mod11_digit(&digits[..10], 11) != digits[10] {
        return None;
    }

    Some(digits)
}

/// A validated CPF.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl ValueObject for Cpf {}

impl Cpf {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let digits = normalize(raw)
            .ok_or_else(|| DomainError::validation(format!("invalid CPF: {raw:?}")))?;
        Ok(Self(digits.iter().map(|d| char::from(b'0' + d)).collect()))
    }

    /// The eleven bare digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.0;
        write!(f, "{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl FromStr for Cpf {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(value: Cpf) -> Self {
        value.0
    }
}
