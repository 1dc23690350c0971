//! Token issuer configuration.

use chrono::Duration;
use thiserror::Error;

pub const SECRET_ENV: &str = "AEROCREW_JWT_SECRET";
pub const TTL_ENV: &str = "AEROCREW_TOKEN_TTL_MINUTES";

/// Default session lifetime.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("AEROCREW_JWT_SECRET is not set")]
    MissingSecret,

    #[error("token signing secret must not be empty")]
    EmptySecret,

    #[error("token ttl must be positive")]
    NonPositiveTtl,

    #[error("invalid token ttl: {0}")]
    InvalidTtl(String),
}

/// Signing secret and TTL shared by every token a process issues.
///
/// Built once at startup and handed to [`crate::TokenIssuer::new`]; tests
/// build as many as they like with distinct secrets.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if ttl <= Duration::zero() {
            return Err(ConfigError::NonPositiveTtl);
        }
        Ok(Self { secret, ttl })
    }

    pub fn with_default_ttl(secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        Self::new(secret, Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    /// Read `AEROCREW_JWT_SECRET` (required) and `AEROCREW_TOKEN_TTL_MINUTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_ENV).ok_or(ConfigError::MissingSecret)?;

        let ttl = match lookup(TTL_ENV) {
            None => Duration::minutes(DEFAULT_TTL_MINUTES),
            Some(raw) => {
                let minutes: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::InvalidTtl(format!("{raw:?}: {e}")))?;
                Duration::try_minutes(minutes)
                    .ok_or_else(|| ConfigError::InvalidTtl(format!("{minutes} minutes is out of range")))?
            }
        };

        Self::new(secret, ttl)
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl core::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}
