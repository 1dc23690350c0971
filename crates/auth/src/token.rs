//! Stateless session tokens (HS256 JWT).
//!
//! A token is valid while its signature verifies against the issuer's
//! secret and `now < expires_at`. There is no session table and no
//! revocation list; refresh mints a new token and leaves the old one to
//! expire on its own.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use aerocrew_core::UserId;

use crate::claims::{SessionClaims, TokenError, validate_claims};
use crate::config::TokenConfig;

/// A freshly minted token plus its validity window.
///
/// `token` is opaque to callers; the timestamps are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub subject: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues, validates and refreshes session tokens.
///
/// Holds only read-only state (keys and TTL), so a single issuer can be
/// shared across threads.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's `now`, not the system clock.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(config.secret()),
            decoding: DecodingKey::from_secret(config.secret()),
            validation,
            ttl: config.ttl(),
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Mint a token for an already-authenticated subject.
    pub fn issue(&self, subject: UserId, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Issuance("expiry out of range".to_string()))?;

        let claims = SessionClaims {
            sub: subject,
            issued_at: now,
            expires_at,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Issuance(e.to_string()))?;

        tracing::debug!(subject = %subject, expires_at = %expires_at, "session token issued");

        Ok(IssuedToken {
            token,
            subject,
            issued_at: now,
            expires_at,
        })
    }

    /// Verify integrity, then expiry. Returns the decoded claims.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "session token rejected");
                TokenError::InvalidSignature
            })?;

        validate_claims(&data.claims, now).inspect_err(|_| {
            tracing::debug!(subject = %data.claims.sub, "session token expired");
        })?;

        Ok(data.claims)
    }

    /// The sole gate for authenticated requests: returns the token's subject.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        self.decode(token, now).map(|claims| claims.sub)
    }

    /// Exchange a still-valid token for a new one issued at `now`.
    ///
    /// Expired tokens are refused; the holder has to log in again. The new
    /// expiry is `now + ttl`, so it is later than the old one only when `now`
    /// is later than the old `issued_at`; refreshing at the very instant of
    /// issuance yields an identical token.
    pub fn refresh(&self, token: &str, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let subject = self.validate(token, now)?;
        self.issue(subject, now)
    }
}

impl core::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}
