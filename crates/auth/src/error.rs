//! Authentication error model.

use thiserror::Error;

use crate::claims::TokenError;

/// Failure reported by an external collaborator (credential store, role
/// directory). Never retried here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Errors surfaced by [`crate::Authenticator`].
///
/// `CredentialMismatch` covers both an unknown login and a wrong secret so
/// callers cannot tell the two apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    CredentialMismatch,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}
