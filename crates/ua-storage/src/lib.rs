//! # ua-storage
//!
//! Storage abstraction for accounts.
//!
//! This crate defines the [`AccountStore`] interface that concrete backends
//! implement, the [`OperationContext`] every storage call honors, and an
//! in-memory reference store used by tests and embedded callers.
//!
//! ## Contract
//!
//! - [`AccountStore::insert`] is atomic with respect to identifier uniqueness:
//!   of any number of concurrent inserts for one identifier, exactly one
//!   succeeds and the rest fail with [`StorageError::Duplicate`].
//! - A cancelled context aborts an insert before any durable effect.
//! - No retries happen at this layer.

#![forbid(unsafe_code)]

pub mod account;
pub mod context;
pub mod error;
pub mod memory;

pub use account::AccountStore;
pub use context::{CancelHandle, OperationContext};
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryAccountStore;
