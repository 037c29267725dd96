//! Credential error types.

use std::fmt;

/// Hashing and verification errors.
#[derive(Debug)]
pub enum AuthError {
    /// The secret does not match the hash.
    InvalidCredentials,
    /// The stored hash could not be parsed.
    InvalidHash(String),
    /// The hashing parameters are unusable, or hashing failed.
    Internal(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::InvalidHash(msg) => write!(f, "invalid secret hash: {msg}"),
            Self::Internal(msg) => write!(f, "internal hashing error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Result type for credential operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AuthError::InvalidCredentials;
        assert_eq!(err.to_string(), "invalid credentials");

        let err = AuthError::InvalidHash("missing algorithm".to_string());
        assert!(err.to_string().contains("missing algorithm"));
    }
}
