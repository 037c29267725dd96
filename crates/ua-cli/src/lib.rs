//! # ua-cli
//!
//! The `useradm` command-line tool.
//!
//! This crate provides:
//! - Account creation with hidden password entry on a terminal
//! - Account lookup by email
//! - Schema migration
//!
//! Results go to stdout; status lines and logs go to stderr.

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod prompt;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
