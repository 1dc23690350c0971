use std::collections::HashMap;
use std::sync::RwLock;

use aerocrew_auth::{AuthError, CredentialRecord, CredentialStore, StoreError, hash_password};
use aerocrew_core::{Saram, UserId};

/// In-memory credential store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<HashMap<Saram, CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, login: Saram, record: CredentialRecord) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::unavailable("credential store lock poisoned"))?;
        map.insert(login, record);
        Ok(())
    }

    /// Hash `secret` and store it for a brand-new user; returns the user's id.
    pub fn register(&self, login: Saram, secret: &str) -> Result<UserId, AuthError> {
        let subject = UserId::new();
        let password_hash = hash_password(secret)?;
        self.insert(
            login,
            CredentialRecord {
                subject,
                password_hash,
            },
        )?;
        tracing::debug!(subject = %subject, "credential registered");
        Ok(subject)
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn lookup_credential(&self, login: &Saram) -> Result<Option<CredentialRecord>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::unavailable("credential store lock poisoned"))?;
        Ok(map.get(login).cloned())
    }
}
