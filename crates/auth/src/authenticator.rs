//! Login, per-request authentication and refresh, wired together.
//!
//! - login: SARAM + secret -> credential store -> token issuer
//! - authenticate: token -> token issuer -> authorization resolver
//! - refresh: token -> token issuer (must still be valid) -> new token

use chrono::{DateTime, Utc};

use aerocrew_core::Saram;

use crate::{
    AuthError, AuthorizationResolver, CredentialStore, IssuedToken, Principal, RoleDirectory,
    TokenIssuer, verify_password,
};

/// Entry point the surrounding service calls for every auth concern.
///
/// Stateless apart from the issuer's keys; no retries, every failure is
/// terminal for the request at hand.
#[derive(Debug, Clone)]
pub struct Authenticator<C, D> {
    credentials: C,
    resolver: AuthorizationResolver<D>,
    issuer: TokenIssuer,
}

impl<C, D> Authenticator<C, D>
where
    C: CredentialStore,
    D: RoleDirectory,
{
    pub fn new(credentials: C, roles: D, issuer: TokenIssuer) -> Self {
        Self {
            credentials,
            resolver: AuthorizationResolver::new(roles),
            issuer,
        }
    }

    /// Verify a login SARAM and secret, then mint a session token.
    ///
    /// A malformed SARAM, an unknown login and a wrong secret all yield
    /// [`AuthError::CredentialMismatch`].
    pub fn login(
        &self,
        login_id: &str,
        secret: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let Ok(login) = Saram::parse(login_id) else {
            tracing::warn!(reason = "malformed_login", "login rejected");
            return Err(AuthError::CredentialMismatch);
        };

        let record = self
            .credentials
            .lookup_credential(&login)
            .inspect_err(|e| tracing::error!(error = %e, "credential lookup failed"))?;

        let Some(record) = record else {
            tracing::warn!(login = %login, reason = "unknown_login", "login rejected");
            return Err(AuthError::CredentialMismatch);
        };

        if !verify_password(&record.password_hash, secret) {
            tracing::warn!(login = %login, reason = "secret_mismatch", "login rejected");
            return Err(AuthError::CredentialMismatch);
        }

        let issued = self.issuer.issue(record.subject, now)?;
        tracing::info!(login = %login, subject = %record.subject, "login succeeded");
        Ok(issued)
    }

    /// Validate a bearer token and attach the subject's role and permissions.
    pub fn authenticate(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let subject = self.issuer.validate(token, now)?;
        let authorization = self
            .resolver
            .resolve(&subject)
            .inspect_err(|e| tracing::error!(error = %e, subject = %subject, "role lookup failed"))?;
        Ok(Principal::new(subject, authorization))
    }

    /// Exchange a still-valid token for a fresh one.
    pub fn refresh(&self, token: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let issued = self.issuer.refresh(token, now)?;
        tracing::info!(subject = %issued.subject, "session refreshed");
        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::TimeZone;

    use crate::{CredentialRecord, Permission, Role, StoreError, TokenConfig, UserId};

    struct OneUser {
        login: Saram,
        record: CredentialRecord,
        lookups: AtomicUsize,
    }

    impl CredentialStore for OneUser {
        fn lookup_credential(&self, login: &Saram) -> Result<Option<CredentialRecord>, StoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok((*login == self.login).then(|| self.record.clone()))
        }
    }

    struct NoRoles;

    impl RoleDirectory for NoRoles {
        fn lookup_role(&self, _subject: &UserId) -> Result<Option<Role>, StoreError> {
            Ok(None)
        }

        fn lookup_permissions(&self, _role: &Role) -> Result<BTreeSet<Permission>, StoreError> {
            Ok(BTreeSet::new())
        }
    }

    struct Offline;

    impl CredentialStore for Offline {
        fn lookup_credential(&self, _login: &Saram) -> Result<Option<CredentialRecord>, StoreError> {
            Err(StoreError::unavailable("connection refused"))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&TokenConfig::with_default_ttl("unit-test-secret").unwrap())
    }

    fn authenticator() -> (Authenticator<OneUser, NoRoles>, UserId) {
        let subject = UserId::new();
        let store = OneUser {
            login: Saram::parse("1234560").unwrap(),
            record: CredentialRecord {
                subject,
                password_hash: crate::hash_password("s3nha").unwrap(),
            },
            lookups: AtomicUsize::new(0),
        };
        (Authenticator::new(store, NoRoles, issuer()), subject)
    }

    #[test]
    fn login_accepts_any_saram_spelling() {
        let (auth, subject) = authenticator();
        for login in ["1234560", "123456-0", " 123456-0 "] {
            let issued = auth.login(login, "s3nha", now()).unwrap();
            assert_eq!(issued.subject, subject);
        }
    }

    #[test]
    fn unknown_login_and_wrong_secret_are_indistinguishable() {
        let (auth, _) = authenticator();
        let unknown = auth.login("181818-0", "s3nha", now()).unwrap_err();
        let wrong = auth.login("1234560", "senha", now()).unwrap_err();
        assert_eq!(unknown, AuthError::CredentialMismatch);
        assert_eq!(wrong, unknown);
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[test]
    fn malformed_login_never_reaches_the_store() {
        let (auth, _) = authenticator();
        for login in ["1234561", "123 456 0", "", "abc"] {
            assert_eq!(auth.login(login, "s3nha", now()), Err(AuthError::CredentialMismatch));
        }
        assert_eq!(auth.credentials.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn store_failure_is_not_a_credential_mismatch() {
        let auth = Authenticator::new(Offline, NoRoles, issuer());
        let err = auth.login("1234560", "s3nha", now()).unwrap_err();
        assert!(matches!(err, AuthError::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn authenticate_without_role_is_not_an_error() {
        let (auth, subject) = authenticator();
        let issued = auth.login("1234560", "s3nha", now()).unwrap();

        let principal = auth.authenticate(&issued.token, now()).unwrap();
        assert_eq!(principal.user_id, subject);
        assert_eq!(principal.role(), None);
        assert!(principal.authorization.permissions.is_empty());
    }
}
