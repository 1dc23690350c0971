use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use aerocrew_core::UserId;

use crate::{Permission, Role, StoreError};

/// Read-only view of role assignments (external collaborator).
///
/// Implementations are typically infra-backed; `aerocrew-infra` ships an
/// in-memory one for tests/dev.
pub trait RoleDirectory: Send + Sync {
    /// The role assigned to `subject`, if any.
    fn lookup_role(&self, subject: &UserId) -> Result<Option<Role>, StoreError>;

    /// Every permission attached to `role` (empty for an unknown role).
    fn lookup_permissions(&self, role: &Role) -> Result<BTreeSet<Permission>, StoreError>;
}

impl<D> RoleDirectory for Arc<D>
where
    D: RoleDirectory + ?Sized,
{
    fn lookup_role(&self, subject: &UserId) -> Result<Option<Role>, StoreError> {
        (**self).lookup_role(subject)
    }

    fn lookup_permissions(&self, role: &Role) -> Result<BTreeSet<Permission>, StoreError> {
        (**self).lookup_permissions(role)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Role and permission set resolved for a subject.
///
/// `role: None` with no permissions is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Authorization {
    pub role: Option<Role>,
    pub permissions: BTreeSet<Permission>,
}

impl Authorization {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn allows(&self, required: &Permission) -> bool {
        self.permissions
            .iter()
            .any(|p| p.is_wildcard() || p == required)
    }

    /// Pure policy check: no IO, no panics.
    pub fn authorize(&self, required: &Permission) -> Result<(), AuthzError> {
        if self.allows(required) {
            Ok(())
        } else {
            Err(AuthzError::Forbidden(required.as_str().to_string()))
        }
    }
}

/// Resolves a validated subject's role and permissions.
///
/// Every call goes to the directory; caching is left to the caller.
#[derive(Debug, Clone)]
pub struct AuthorizationResolver<D> {
    directory: D,
}

impl<D> AuthorizationResolver<D>
where
    D: RoleDirectory,
{
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn resolve(&self, subject: &UserId) -> Result<Authorization, StoreError> {
        let Some(role) = self.directory.lookup_role(subject)? else {
            tracing::debug!(subject = %subject, "no role assigned");
            return Ok(Authorization::none());
        };

        let permissions = self.directory.lookup_permissions(&role)?;
        tracing::debug!(
            subject = %subject,
            role = %role,
            permissions = permissions.len(),
            "authorization resolved"
        );

        Ok(Authorization {
            role: Some(role),
            permissions,
        })
    }
}
