//! Credential lookup and password hashing.

use std::sync::Arc;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use aerocrew_core::{Saram, UserId};

use crate::error::{AuthError, StoreError};

/// Stored credential for one login (external collaborator's representation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub subject: UserId,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Read-only credential lookup keyed by login SARAM.
pub trait CredentialStore: Send + Sync {
    fn lookup_credential(&self, login: &Saram) -> Result<Option<CredentialRecord>, StoreError>;
}

impl<S> CredentialStore for Arc<S>
where
    S: CredentialStore + ?Sized,
{
    fn lookup_credential(&self, login: &Saram) -> Result<Option<CredentialRecord>, StoreError> {
        (**self).lookup_credential(login)
    }
}

/// Hash a plaintext secret into an Argon2id PHC string with a random salt.
pub fn hash_password(secret: &str) -> Result<String, AuthError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;

    let phc = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Check a plaintext secret against a PHC string. Unparsable hashes never match.
pub fn verify_password(hash: &str, secret: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is not a valid PHC string");
            false
        }
    }
}
