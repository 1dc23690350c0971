//! `aerocrew-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model and identity-document value objects.

pub mod documents;
pub mod error;
pub mod id;
pub mod value_object;

pub use documents::{Cpf, Saram, validate_cpf, validate_saram};
pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use value_object::ValueObject;
