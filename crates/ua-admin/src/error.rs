//! Account administration errors.
//!
//! Each variant identifies the failing stage (validation, hashing or
//! storage). None of them carries the plaintext secret.

use thiserror::Error;
use ua_model::ValidationError;
use ua_storage::StorageError;

/// Errors returned by [`AccountAdministrator`](crate::AccountAdministrator).
#[derive(Debug, Error)]
pub enum AdminError {
    /// The candidate account broke a validation rule.
    #[error("account validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An account with the same identifier already exists.
    #[error("account '{identifier}' already exists")]
    AlreadyExists {
        /// The conflicting identifier.
        identifier: String,
    },

    /// The account store could not be reached.
    #[error("account store unreachable: {0}")]
    Connection(#[source] StorageError),

    /// The account store failed for another reason.
    #[error("account store failure: {0}")]
    Storage(#[source] StorageError),

    /// The operation was cancelled before the account was stored.
    #[error("operation cancelled, no account was created")]
    Cancelled,

    /// Hashing the secret failed.
    #[error("secret hashing failed: {0}")]
    Hashing(String),
}

/// Broad classes of failure a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; the user must correct it.
    Validation,
    /// Domain conflict (duplicate identifier).
    Conflict,
    /// Transient infrastructure failure; an operator may need to look.
    Infrastructure,
    /// The caller cancelled or timed out.
    Cancelled,
    /// Unexpected internal failure.
    Internal,
}

impl AdminError {
    /// Returns the class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::AlreadyExists { .. } => ErrorKind::Conflict,
            Self::Connection(_) | Self::Storage(_) => ErrorKind::Infrastructure,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Hashing(_) => ErrorKind::Internal,
        }
    }

    /// Returns `true` if repeating the same call could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Cancelled)
    }
}

impl From<StorageError> for AdminError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { value, .. } => Self::AlreadyExists { identifier: value },
            StorageError::Cancelled => Self::Cancelled,
            err @ StorageError::Connection(_) => Self::Connection(err),
            err => Self::Storage(err),
        }
    }
}

/// Result type for administration operations.
pub type AdminResult<T> = Result<T, AdminError>;
