//! `aerocrew-infra` — adapters for the collaborators `aerocrew-auth` reads from.
//!
//! Only in-memory implementations live here; they back the test suites and
//! local development. A relational implementation plugs in through the same
//! traits.

pub mod credentials;
pub mod roles;

pub use credentials::InMemoryCredentialStore;
pub use roles::{InMemoryRoleDirectory, default_role_permissions};
