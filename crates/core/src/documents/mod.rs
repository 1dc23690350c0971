//! Brazilian identity-document numbers and their check-digit algorithms.
//!
//! Validators are pure and never fail: malformed input is simply `false`.

pub mod cpf;
pub mod saram;

pub use cpf::Cpf;
pub use saram::Saram;

/// Validate a SARAM given as a string or an integer.
pub fn validate_saram(value: impl core::fmt::Display) -> bool {
    saram::validate(value)
}

/// Validate a CPF, with or without its `000.000.000-00` mask.
pub fn validate_cpf(value: &str) -> bool {
    cpf::validate(value)
}
