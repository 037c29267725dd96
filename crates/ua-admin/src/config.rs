//! Administrator configuration.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use ua_auth::HashPolicy;
use ua_model::ValidationPolicy;

/// Options recognized by [`AccountAdministrator`](crate::AccountAdministrator).
///
/// Every section has documented defaults, so `AdminConfig::default()` is a
/// complete production configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Hash work factor (Argon2id memory, iterations, parallelism).
    pub hashing: HashPolicy,
    /// Secret strength thresholds.
    pub validation: ValidationPolicy,
    /// Identifier case handling.
    pub identifier: IdentifierPolicy,
}

impl AdminConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hashing policy.
    #[must_use]
    pub fn with_hashing(mut self, hashing: HashPolicy) -> Self {
        self.hashing = hashing;
        self
    }

    /// Sets the validation policy.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Sets the identifier policy.
    #[must_use]
    pub fn with_identifier(mut self, identifier: IdentifierPolicy) -> Self {
        self.identifier = identifier;
        self
    }
}

/// How identifiers are compared.
///
/// By default identifiers are case-sensitive and stored exactly as
/// supplied. With `normalize` set, they are lowercased before validation,
/// insertion and lookup, so `A@Example.com` and `a@example.com` collide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierPolicy {
    /// Lowercase identifiers before use (default `false`).
    pub normalize: bool,
}

impl IdentifierPolicy {
    /// Case-sensitive identifiers.
    #[must_use]
    pub const fn case_sensitive() -> Self {
        Self { normalize: false }
    }

    /// Lowercased identifiers.
    #[must_use]
    pub const fn lowercase() -> Self {
        Self { normalize: true }
    }

    /// Applies the policy to an identifier.
    #[must_use]
    pub fn apply<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        if self.normalize && identifier.chars().any(char::is_uppercase) {
            Cow::Owned(identifier.to_lowercase())
        } else {
            Cow::Borrowed(identifier)
        }
    }
}
