//! SQL storage error types.

use sqlx::Error as SqlxError;
use ua_storage::account::{ACCOUNT_ENTITY, IDENTIFIER_FIELD};
use ua_storage::StorageError;

/// Converts a `SQLx` error to a storage error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError) -> StorageError {
    match err {
        SqlxError::Database(db_err) => StorageError::Query(db_err.to_string()),
        SqlxError::Io(e) => StorageError::Connection(e.to_string()),
        SqlxError::Tls(e) => StorageError::Connection(format!("TLS: {e}")),
        SqlxError::Protocol(msg) => StorageError::Connection(format!("protocol: {msg}")),
        SqlxError::PoolTimedOut => StorageError::Connection("connection pool timeout".to_string()),
        SqlxError::PoolClosed => StorageError::Connection("connection pool closed".to_string()),
        SqlxError::WorkerCrashed => {
            StorageError::Connection("connection worker crashed".to_string())
        }
        _ => StorageError::Internal(err.to_string()),
    }
}

/// Converts an insert failure, mapping unique violations to a duplicate
/// error on the account identifier.
pub fn from_insert_error(err: SqlxError, identifier: &str) -> StorageError {
    if let SqlxError::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StorageError::duplicate(ACCOUNT_ENTITY, IDENTIFIER_FIELD, identifier);
        }
    }
    from_sqlx_error(err)
}
