//! Account domain model.
//!
//! Accounts are identified by an email address and authenticate with a
//! secret. Only the hashed form of the secret is ever stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::secret::{PlainSecret, SecretHash};

/// A candidate account, built by a caller and not yet persisted.
///
/// It has no id: identity is assigned by the account store on insertion.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Email address used as the unique identifier.
    pub identifier: String,
    /// Plaintext secret; replaced by a hash before reaching storage.
    pub secret: PlainSecret,
}

impl NewAccount {
    /// Creates a new candidate account.
    #[must_use]
    pub fn new(identifier: impl Into<String>, secret: impl Into<PlainSecret>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Replaces the plaintext secret with its hash, consuming the candidate.
    #[must_use]
    pub fn into_hashed(self, secret_hash: SecretHash) -> HashedAccount {
        HashedAccount {
            identifier: self.identifier,
            secret_hash,
        }
    }
}

/// A candidate account whose secret has been hashed.
///
/// This is the only shape an account store accepts for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedAccount {
    /// Email address used as the unique identifier.
    pub identifier: String,
    /// Salted one-way hash of the secret.
    pub secret_hash: SecretHash,
}

/// A persisted account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier; immutable once assigned.
    pub id: Uuid,
    /// Email address; unique across all accounts and immutable once stored.
    pub identifier: String,
    /// Salted one-way hash of the secret.
    pub secret_hash: SecretHash,
    /// When the account was persisted.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Builds a stored record from a hashed candidate, assigning a fresh id
    /// and the current time.
    #[must_use]
    pub fn from_hashed(account: HashedAccount) -> Self {
        Self {
            id: Uuid::now_v7(),
            identifier: account.identifier,
            secret_hash: account.secret_hash,
            created_at: Utc::now(),
        }
    }

    /// Returns a view of this account without the credential.
    #[must_use]
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            identifier: self.identifier.clone(),
            created_at: self.created_at,
        }
    }
}

/// Account view without any credential material, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account id.
    pub id: Uuid,
    /// Email address.
    pub identifier: String,
    /// When the account was persisted.
    pub created_at: DateTime<Utc>,
}
