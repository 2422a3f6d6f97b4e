//! `fleetdesk-infra` — storage adapters behind the auth-layer traits.
//!
//! In-memory implementations back development, tests, and the demo server;
//! the traits they implement live in `fleetdesk-auth` so a database-backed
//! adapter can replace them without touching any decision logic.

pub mod account_directory;
pub mod challenge_store;

#[cfg(test)]
mod integration_tests;

pub use account_directory::{AccountStoreError, DirectoryAccount, InMemoryAccountDirectory};
pub use challenge_store::InMemoryChallengeStore;
