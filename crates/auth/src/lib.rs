//! `fleetdesk-auth` — pure authentication/authorization boundary (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage: transports
//! hand in bearer tokens, the persistence layer hands in live account
//! records, and every admission decision comes back as a value. A request
//! reaches domain logic only after the credential is verified, its tenant
//! scope resolved, and the authorization gate passed.

pub mod challenge;
pub mod claims;
pub mod directory;
pub mod error;
pub mod gate;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod scope;
pub mod verifier;

pub use challenge::{Challenge, ChallengeStore};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use directory::{AccountDirectory, AccountRecord, DirectoryError};
pub use error::AuthError;
pub use gate::AuthorizationGate;
pub use jwt::{Hs256JwtValidator, JwtValidator, TokenError};
pub use permissions::PermissionTable;
pub use principal::Principal;
pub use roles::{Role, UnknownRole};
pub use scope::{RequestKind, ScopedRequest, scope_request};
pub use verifier::CredentialVerifier;
