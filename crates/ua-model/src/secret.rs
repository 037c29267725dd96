//! Secret representations.
//!
//! A [`PlainSecret`] only lives on the call stack of the caller and the
//! administrator. A [`SecretHash`] is the only credential form that is
//! ever handed to storage.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{ZeroizeOnDrop, Zeroizing};

/// A plaintext secret (password) as typed by the user.
///
/// Does not implement `Display` or `Serialize`, and its `Debug` output is
/// redacted, so it cannot end up in logs or persisted structures by accident.
/// The buffer is wiped when the secret is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainSecret(Zeroizing<String>);

impl PlainSecret {
    /// Wraps a plaintext secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Returns the plaintext.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Returns `true` if the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters (not bytes).
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl ZeroizeOnDrop for PlainSecret {}

impl fmt::Debug for PlainSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainSecret(<redacted>)")
    }
}

impl From<&str> for PlainSecret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlainSecret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A salted one-way hash of a secret, in PHC string format
/// (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretHash(String);

impl SecretHash {
    /// Wraps an already computed PHC hash string.
    #[must_use]
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Returns the PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the hash, returning the PHC string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The algorithm prefix is useful when debugging; the salt and digest are not.
        let algorithm = self.0.split('$').nth(1).unwrap_or("unknown");
        write!(f, "SecretHash({algorithm}, <redacted>)")
    }
}
