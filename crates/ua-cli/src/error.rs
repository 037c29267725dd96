//! CLI error types and process exit codes.

use thiserror::Error;
use ua_admin::{AdminError, ErrorKind};
use ua_model::ValidationError;
use ua_storage::StorageError;

use crate::prompt::SecretReadError;

/// Process exit codes.
pub mod exit_code {
    /// Command succeeded.
    pub const SUCCESS: u8 = 0;
    /// Unclassified failure.
    pub const FAILURE: u8 = 1;
    /// Input broke a validation rule.
    pub const VALIDATION: u8 = 2;
    /// The account already exists.
    pub const ALREADY_EXISTS: u8 = 3;
    /// Database unreachable or failing.
    pub const STORAGE: u8 = 4;
    /// The password could not be read.
    pub const SECRET_INPUT: u8 = 5;
    /// Configuration missing or invalid.
    pub const CONFIG: u8 = 6;
}

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Account administration failed.
    #[error(transparent)]
    Admin(#[from] AdminError),

    /// Storage error outside account administration (connect, migrate).
    #[error("database error: {0}")]
    Storage(#[from] StorageError),

    /// The password could not be read.
    #[error("could not read password: {0}")]
    SecretInput(#[from] SecretReadError),

    /// Account not found.
    #[error("account not found: {identifier}")]
    NotFound {
        /// Requested identifier.
        identifier: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => exit_code::CONFIG,
            Self::Validation(_) => exit_code::VALIDATION,
            Self::Admin(e) => match e.kind() {
                ErrorKind::Validation => exit_code::VALIDATION,
                ErrorKind::Conflict => exit_code::ALREADY_EXISTS,
                ErrorKind::Infrastructure => exit_code::STORAGE,
                ErrorKind::Cancelled | ErrorKind::Internal => exit_code::FAILURE,
            },
            Self::Storage(StorageError::Cancelled) => exit_code::FAILURE,
            Self::Storage(_) => exit_code::STORAGE,
            Self::SecretInput(_) => exit_code::SECRET_INPUT,
            Self::NotFound { .. } | Self::Io(_) | Self::Json(_) => exit_code::FAILURE,
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_failure_class() {
        let cases = [
            (CliError::Config("missing".to_string()), 6),
            (CliError::Validation(ValidationError::EmptyIdentifier), 2),
            (CliError::Admin(AdminError::Validation(ValidationError::EmptySecret)), 2),
            (
                CliError::Admin(AdminError::AlreadyExists {
                    identifier: "a@example.com".to_string(),
                }),
                3,
            ),
            (
                CliError::Admin(AdminError::Connection(StorageError::Connection(
                    "refused".to_string(),
                ))),
                4,
            ),
            (CliError::Storage(StorageError::Connection("refused".to_string())), 4),
            (CliError::SecretInput(SecretReadError::NotATerminal), 5),
            (CliError::Admin(AdminError::Cancelled), 1),
            (
                CliError::NotFound {
                    identifier: "a@example.com".to_string(),
                },
                1,
            ),
        ];

        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "{err}");
        }
    }
}
