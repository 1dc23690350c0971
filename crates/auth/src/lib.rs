//! `aerocrew-auth` — authentication and authorization boundary.
//!
//! Login verifies a SARAM + secret against a [`CredentialStore`], the
//! [`TokenIssuer`] mints stateless signed session tokens, and the
//! [`AuthorizationResolver`] attaches a role and its permissions to a
//! validated subject. Storage and transport are supplied by the caller.
//!
//! Every time-sensitive operation takes `now` explicitly; nothing here
//! reads the wall clock.

pub mod authenticator;
pub mod authorize;
pub mod claims;
pub mod config;
pub mod credentials;
pub mod error;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod token;

pub use authenticator::Authenticator;
pub use authorize::{Authorization, AuthorizationResolver, AuthzError, RoleDirectory};
pub use claims::{SessionClaims, TokenError, validate_claims};
pub use config::{ConfigError, TokenConfig};
pub use credentials::{CredentialRecord, CredentialStore, hash_password, verify_password};
pub use error::{AuthError, StoreError};
pub use permissions::Permission;
pub use principal::Principal;
pub use roles::Role;
pub use token::{IssuedToken, TokenIssuer};

pub use aerocrew_core::UserId;
