use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aerocrew_core::UserId;

/// Session token claims (transport-agnostic).
///
/// This is everything a token carries: who it is about and the window in
/// which it is valid. Role and permissions are resolved per request and are
/// never embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp (`issued_at + ttl`).
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Tampered, signed with another secret, or not a token at all.
    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token could not be issued: {0}")]
    Issuance(String),
}

/// Deterministically validate session claims against `now`.
///
/// Note: this validates the *claims* only. Signature verification happens
/// in [`crate::TokenIssuer`] before claims are ever looked at.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if now >= claims.expires_at {
        return Err(TokenError::Expired);
    }
    Ok(())
}
