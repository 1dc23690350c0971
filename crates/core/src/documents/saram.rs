//! SARAM: military personnel registration number.
//!
//! A SARAM is a run of base digits followed by a single modulo-11 check
//! digit. Weights cycle through `2..=7` starting at the least-significant
//! base digit.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const WEIGHTS: [u32; 6] = [2, 3, 4, 5, 6, 7];

/// Compute the check digit for a SARAM base (the number without its check digit).
///
/// Returns `None` for an empty base or one containing anything other than
/// ASCII digits. When the modulo-11 step yields 10 or 11 the digit is `0`.
pub fn check_digit(base: &str) -> Option<u8> {
    if base.is_empty() {
        return None;
    }

    // Reduced every step so arbitrarily long bases cannot overflow.
    let mut sum = 0u32;
    for (position, c) in base.chars().rev().enumerate() {
        let digit = c.to_digit(10)?;
        sum = (sum + digit * WEIGHTS[position % WEIGHTS.len()]) % 11;
    }

    match 11 - sum {
        10 | 11 => Some(0),
        check => Some(check as u8),
    }
}

/// Validate a SARAM given as a string or an integer.
///
/// Edge whitespace and hyphens are ignored; any other non-digit character
/// (interior whitespace included) makes the value invalid.
pub fn validate(value: impl fmt::Display) -> bool {
    normalize(&value.to_string()).is_some()
}

/// Normalized digits of a valid SARAM, or `None`.
fn normalize(raw: &str) -> Option<String> {
    let digits: String = raw.trim().chars().filter(|c| *c != '-').collect();
    if digits.len() < 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (base, declared) = digits.split_at(digits.len() - 1);
    let declared = declared.parse::<u8>().ok()?;
    (check_digit(base)? == declared).then_some(digits)
}

/// A validated SARAM.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Saram(String);

impl ValueObject for Saram {}

impl Saram {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        normalize(raw)
            .map(Self)
            .ok_or_else(|| DomainError::validation(format!("invalid SARAM: {raw:?}")))
    }

    /// Bare digits, check digit included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn base(&self) -> &str {
        &self.0[..self.0.len() - 1]
    }

    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes()[self.0.len() - 1] - b'0'
    }
}

impl fmt::Display for Saram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base(), self.check_digit())
    }
}

impl FromStr for Saram {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Saram {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Saram> for String {
    fn from(value: Saram) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_digit_coerces_ten_and_eleven_to_zero() {
        // remainder 1 -> 10
        assert_eq!(check_digit("181818"), Some(0));
        // remainder 0 -> 11
        assert_eq!(check_digit("818181"), Some(0));
    }

    #[test]
    fn check_digit_weights_cycle_past_six_digits() {
        // 1*2 + 2*3 + 3*4 + 4*5 + 5*6 + 6*7 + 7*2 = 126, 126 % 11 = 5
        assert_eq!(check_digit("7654321"), Some(6));
    }

    #[test]
    fn check_digit_handles_very_long_bases() {
        // Each run of six nines adds 9 * (2+3+4+5+6+7) = 243 = 1 (mod 11), so
        // 120M nines sum to 20M = 9 (mod 11), giving 11 - 9 = 2. An unreduced
        // u32 sum overflows well before this length.
        let base = "9".repeat(120_000_000);
        assert_eq!(check_digit(&base), Some(2));
    }

    #[test]
    fn check_digit_rejects_empty_and_non_digits() {
        assert_eq!(check_digit(""), None);
        assert_eq!(check_digit("12a456"), None);
        assert_eq!(check_digit("123 45"), None);
    }

    #[test]
    fn validate_accepts_known_value_in_every_form() {
        assert!(validate("1234560"));
        assert!(validate("123456-0"));
        assert!(validate("  1234560  "));
        assert!(validate(1234560u64));
    }

    #[test]
    fn validate_is_hyphen_insensitive() {
        assert_eq!(validate("123456-0"), validate("1234560"));
        assert_eq!(validate("12-34-56-1"), validate("1234561"));
    }

    #[test]
    fn validate_rejects_interior_whitespace() {
        assert!(!validate("123 456 7"));
        assert!(!validate("123456 0"));
    }

    #[test]
    fn validate_rejects_short_or_non_numeric_input() {
        assert!(!validate(""));
        assert!(!validate("0"));
        assert!(!validate("-"));
        assert!(!validate("12345a0"));
        assert!(!validate("１２３４５６０"));
    }

    #[test]
    fn validate_rejects_wrong_check_digit() {
        assert!(!validate("1234561"));
        assert!(!validate("123456-9"));
    }

    #[test]
    fn parse_normalizes_and_formats() {
        let saram = Saram::parse(" 123456-0 ").unwrap();
        assert_eq!(saram.as_str(), "1234560");
        assert_eq!(saram.base(), "123456");
        assert_eq!(saram.check_digit(), 0);
        assert_eq!(saram.to_string(), "123456-0");
    }

    #[test]
    fn parse_rejects_invalid_value() {
        let err = Saram::parse("1234567").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn serde_uses_bare_digits_and_revalidates() {
        let saram: Saram = "123456-0".parse().unwrap();
        let json = serde_json::to_string(&saram).unwrap();
        assert_eq!(json, "\"1234560\"");

        let back: Saram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, saram);

        assert!(serde_json::from_str::<Saram>("\"1234567\"").is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: every digit string has a single-digit check digit.
            #[test]
            fn check_digit_is_a_single_digit(base in "[0-9]{1,20}") {
                let dv = check_digit(&base).unwrap();
                prop_assert!(dv <= 9);
            }

            /// Property: base + computed digit validates, base + any other digit does not.
            #[test]
            fn computed_digit_validates_and_neighbour_does_not(base in "[0-9]{1,12}") {
                let dv = check_digit(&base).unwrap();
                let valid = format!("{base}{dv}");
                prop_assert!(validate(&valid));

                let wrong = (dv + 1) % 10;
                let invalid = format!("{base}{wrong}");
                prop_assert!(!validate(&invalid));
            }

            /// Property: the hyphen before the check digit is ignored.
            #[test]
            fn hyphenated_form_matches_bare_form(digits in "[0-9]{2,12}") {
                let (base, dv) = digits.split_at(digits.len() - 1);
                let hyphenated = format!("{base}-{dv}");
                prop_assert_eq!(validate(&hyphenated), validate(&digits));
            }
        }
    }
}
