//! # ua-model
//!
//! Domain model for the user-administration service.
//!
//! An account moves through three shapes on its way to storage:
//!
//! - [`NewAccount`] - the candidate built by a caller, carrying a plaintext secret
//! - [`HashedAccount`] - the same candidate after the secret was replaced by a hash
//! - [`Account`] - the persisted record, with a store-assigned id and creation time
//!
//! The [`Validator`] enforces the rules a candidate must satisfy before it
//! may be hashed and persisted.

#![forbid(unsafe_code)]

pub mod account;
pub mod secret;
pub mod validation;

pub use account::{Account, AccountSummary, HashedAccount, NewAccount};
pub use secret::{PlainSecret, SecretHash};
pub use validation::{PolicyError, ValidationError, ValidationPolicy, Validator};
