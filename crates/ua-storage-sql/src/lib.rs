//! # ua-storage-sql
//!
//! SQLx-based storage implementation for accounts.
//!
//! This crate provides `PostgreSQL` storage using `SQLx`. Identifier
//! uniqueness is enforced by the `accounts_identifier_key` unique index, so
//! concurrent inserts of one identifier resolve inside the database.

#![forbid(unsafe_code)]

pub mod account;
pub mod entities;
pub mod error;
pub mod pool;

pub use account::PgAccountStore;
pub use pool::{create_pool, run_migrations, PoolConfig};
pub use sqlx::PgPool;
