use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use aerocrew_auth::{Permission, Role, RoleDirectory, StoreError};
use aerocrew_core::UserId;

/// Roles seeded by [`InMemoryRoleDirectory::with_default_roles`].
pub const DEFAULT_ROLES: [&str; 4] = [Role::ADMIN, "operations", "scheduler", "crew"];

/// Default role-to-permission mapping for the unit.
///
/// Deployments with a real role table replace this wholesale.
pub fn default_role_permissions(role: &str) -> Vec<Permission> {
    let names: &[&'static str] = match role {
        Role::ADMIN => &[Permission::WILDCARD],
        "operations" => &[
            "crew.read",
            "crew.write",
            "quads.read",
            "quads.write",
            "availability.read",
            "availability.write",
            "per_diem.read",
            "per_diem.write",
            "airfields.read",
            "airfields.write",
            "cities.read",
            "cities.write",
        ],
        "scheduler" => &[
            "crew.read",
            "quads.read",
            "availability.read",
            "availability.write",
            "airfields.read",
            "cities.read",
        ],
        "crew" => &["crew.read", "quads.read", "availability.read"],
        _ => &[],
    };

    names.iter().map(|n| Permission::new(*n)).collect()
}

/// In-memory role directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryRoleDirectory {
    assignments: RwLock<HashMap<UserId, Role>>,
    grants: RwLock<HashMap<Role, BTreeSet<Permission>>>,
}

fn poisoned() -> StoreError {
    StoreError::unavailable("role directory lock poisoned")
}

impl InMemoryRoleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_roles() -> Result<Self, StoreError> {
        let directory = Self::new();
        for role in DEFAULT_ROLES {
            directory.grant(&Role::new(role), default_role_permissions(role))?;
        }
        Ok(directory)
    }

    /// Assign `role` to `user`, replacing any previous role.
    pub fn assign(&self, user: UserId, role: Role) -> Result<(), StoreError> {
        self.assignments.write().map_err(|_| poisoned())?.insert(user, role);
        Ok(())
    }

    pub fn unassign(&self, user: &UserId) -> Result<Option<Role>, StoreError> {
        Ok(self.assignments.write().map_err(|_| poisoned())?.remove(user))
    }

    pub fn grant(
        &self,
        role: &Role,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Result<(), StoreError> {
        self.grants
            .write()
            .map_err(|_| poisoned())?
            .entry(role.clone())
            .or_default()
            .extend(permissions);
        Ok(())
    }
}

impl RoleDirectory for InMemoryRoleDirectory {
    fn lookup_role(&self, subject: &UserId) -> Result<Option<Role>, StoreError> {
        let map = self.assignments.read().map_err(|_| poisoned())?;
        Ok(map.get(subject).cloned())
    }

    fn lookup_permissions(&self, role: &Role) -> Result<BTreeSet<Permission>, StoreError> {
        let map = self.grants.read().map_err(|_| poisoned())?;
        Ok(map.get(role).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roles_are_seeded() {
        let directory = InMemoryRoleDirectory::with_default_roles().unwrap();

        let admin = directory.lookup_permissions(&Role::admin()).unwrap();
        assert_eq!(admin.len(), 1);
        assert!(admin.iter().all(Permission::is_wildcard));

        let crew = directory.lookup_permissions(&Role::new("crew")).unwrap();
        assert!(crew.contains(&Permission::new("crew.read")));
        assert!(!crew.contains(&Permission::new("crew.write")));
    }

    #[test]
    fn unknown_role_has_no_permissions() {
        assert!(default_role_permissions("pilot").is_empty());

        let directory = InMemoryRoleDirectory::with_default_roles().unwrap();
        assert!(directory.lookup_permissions(&Role::new("pilot")).unwrap().is_empty());
    }

    #[test]
    fn assign_replaces_and_unassign_clears() {
        let directory = InMemoryRoleDirectory::new();
        let user = UserId::new();

        assert_eq!(directory.lookup_role(&user), Ok(None));

        directory.assign(user, Role::new("crew")).unwrap();
        directory.assign(user, Role::new("scheduler")).unwrap();
        assert_eq!(directory.lookup_role(&user), Ok(Some(Role::new("scheduler"))));

        assert_eq!(directory.unassign(&user), Ok(Some(Role::new("scheduler"))));
        assert_eq!(directory.lookup_role(&user), Ok(None));
    }

    #[test]
    fn grants_accumulate() {
        let directory = InMemoryRoleDirectory::new();
        let role = Role::new("auditor");
        directory.grant(&role, [Permission::new("crew.read")]).unwrap();
        directory.grant(&role, [Permission::new("per_diem.read")]).unwrap();

        let perms = directory.lookup_permissions(&role).unwrap();
        assert_eq!(perms.len(), 2);
    }
}
