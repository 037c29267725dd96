//! # ua-admin
//!
//! The "create account" use case.
//!
//! [`AccountAdministrator`] is the unit a caller (CLI, API handler, batch
//! job) invokes. Each creation attempt moves through
//! `Candidate -> Validated -> Hashed -> Persisted`, or stops in a terminal
//! error at any stage. Nothing is retried here; the [`ErrorKind`] of a
//! failure tells the caller whether to ask the user again or alert an
//! operator.
//!
//! The administrator holds no mutable state and can be shared across
//! concurrent calls. Uniqueness rests entirely on the store's atomic insert.

#![forbid(unsafe_code)]

pub mod administrator;
pub mod config;
pub mod error;

pub use administrator::AccountAdministrator;
pub use config::{AdminConfig, IdentifierPolicy};
pub use error::{AdminError, AdminResult, ErrorKind};
