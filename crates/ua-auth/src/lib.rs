//! # ua-auth
//!
//! Credential primitives for the user-administration service.
//!
//! Secrets are hashed with Argon2id, a memory-hard scheme whose work
//! factor is set by a [`HashPolicy`]. Every hash gets a fresh random salt,
//! so hashing the same secret twice yields two different PHC strings that
//! both verify against it.
//!
//! ## Example
//!
//! ```ignore
//! use ua_auth::SecretHasher;
//! use ua_model::PlainSecret;
//!
//! let hasher = SecretHasher::with_defaults();
//! let secret = PlainSecret::new("Sup3rSecret!");
//! let hash = hasher.hash(&secret)?;
//! hasher.verify(&secret, &hash)?;
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod hasher;

pub use error::{AuthError, AuthResult};
pub use hasher::{HashPolicy, SecretHasher};
