use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier, conventionally `"<resource>.<action>"`
/// (e.g. `"crew.write"`, `"per_diem.read"`).
///
/// The wildcard permission `"*"` grants everything and is reserved for the
/// administrator role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: &'static str = "*";

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn wildcard() -> Self {
        Self::new(Self::WILDCARD)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == Self::WILDCARD
    }

    /// Resource part of a `resource.action` permission.
    pub fn resource(&self) -> Option<&str> {
        self.as_str().rsplit_once('.').map(|(resource, _)| resource)
    }

    /// Action part of a `resource.action` permission.
    pub fn action(&self) -> Option<&str> {
        self.as_str().rsplit_once('.').map(|(_, action)| action)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
