use serde::Serialize;

use aerocrew_core::UserId;

use crate::{Authorization, AuthzError, Permission, Role};

/// An authenticated request identity: the token's subject plus the role and
/// permissions resolved for it.
///
/// This is what the surrounding service attaches to a request before handing
/// it to a business endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: UserId,
    pub authorization: Authorization,
}

impl Principal {
    pub fn new(user_id: UserId, authorization: Authorization) -> Self {
        Self {
            user_id,
            authorization,
        }
    }

    pub fn role(&self) -> Option<&Role> {
        self.authorization.role.as_ref()
    }

    pub fn authorize(&self, required: &Permission) -> Result<(), AuthzError> {
        self.authorization.authorize(required)
    }
}
