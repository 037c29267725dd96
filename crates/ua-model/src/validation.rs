//! Creation-time validation of candidate accounts.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. identifier is non-empty
//! 2. identifier matches the email grammar
//! 3. secret is non-empty
//! 4. secret meets the length floor and ceiling
//! 5. secret spans enough character classes
//!
//! Uniqueness is not checked here. Only the account store can make the
//! check-and-insert atomic.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::NewAccount;
use crate::secret::PlainSecret;

/// Longest accepted identifier (RFC 5321 forward-path limit minus brackets).
pub const MAX_IDENTIFIER_LENGTH: usize = 254;

/// Longest accepted local part (before the `@`).
pub const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Default minimum secret length, in characters.
pub const DEFAULT_MIN_SECRET_LENGTH: usize = 8;

/// Default maximum secret length, in characters.
pub const DEFAULT_MAX_SECRET_LENGTH: usize = 256;

#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    ))
    .expect("email pattern is a valid regex")
});

/// Reasons a candidate account is rejected.
///
/// Messages never include the secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The identifier is empty.
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// The identifier is not a valid email address.
    #[error("identifier '{0}' is not a valid email address")]
    MalformedIdentifier(String),

    /// The secret is empty.
    #[error("password must not be empty")]
    EmptySecret,

    /// The secret is shorter than the policy allows.
    #[error("password must be at least {min} characters long")]
    SecretTooShort {
        /// Minimum length in characters.
        min: usize,
    },

    /// The secret is longer than the policy allows.
    #[error("password must be at most {max} characters long")]
    SecretTooLong {
        /// Maximum length in characters.
        max: usize,
    },

    /// The secret does not mix enough character classes.
    #[error("password must mix at least {required} of lowercase, uppercase, digits, symbols")]
    SecretTooWeak {
        /// Number of distinct character classes required.
        required: u8,
    },
}

impl ValidationError {
    /// Returns `true` if the identifier was rejected.
    #[must_use]
    pub const fn is_identifier_error(&self) -> bool {
        matches!(self, Self::EmptyIdentifier | Self::MalformedIdentifier(_))
    }

    /// Returns `true` if the secret was rejected.
    #[must_use]
    pub const fn is_secret_error(&self) -> bool {
        !self.is_identifier_error()
    }
}

/// Secret strength thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Minimum secret length in characters (default 8).
    pub min_secret_length: usize,
    /// Maximum secret length in characters (default 256).
    pub max_secret_length: usize,
    /// Distinct character classes required, out of lowercase, uppercase,
    /// digit and other (default 1, i.e. no complexity requirement).
    pub min_character_classes: u8,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_secret_length: DEFAULT_MIN_SECRET_LENGTH,
            max_secret_length: DEFAULT_MAX_SECRET_LENGTH,
            min_character_classes: 1,
        }
    }
}

/// A [`ValidationPolicy`] whose thresholds contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The length floor is above the ceiling, so no secret can pass.
    #[error("min_secret_length ({min}) is greater than max_secret_length ({max})")]
    LengthBoundsInverted {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The ceiling is zero, so no secret can pass.
    #[error("max_secret_length must be at least 1")]
    ZeroMaxLength,

    /// More character classes required than exist.
    #[error("min_character_classes must be between 1 and 4, got {0}")]
    CharacterClassesOutOfRange(u8),
}

impl ValidationPolicy {
    /// Creates a policy with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum secret length.
    #[must_use]
    pub const fn min_secret_length(mut self, min: usize) -> Self {
        self.min_secret_length = min;
        self
    }

    /// Sets the maximum secret length.
    #[must_use]
    pub const fn max_secret_length(mut self, max: usize) -> Self {
        self.max_secret_length = max;
        self
    }

    /// Checks that at least one secret can satisfy the policy.
    ///
    /// # Errors
    ///
    /// Returns the first contradiction found.
    pub const fn check(&self) -> Result<(), PolicyError> {
        if self.max_secret_length == 0 {
            return Err(PolicyError::ZeroMaxLength);
        }
        if self.min_secret_length > self.max_secret_length {
            return Err(PolicyError::LengthBoundsInverted {
                min: self.min_secret_length,
                max: self.max_secret_length,
            });
        }
        if self.min_character_classes == 0 || self.min_character_classes > 4 {
            return Err(PolicyError::CharacterClassesOutOfRange(self.min_character_classes));
        }
        Ok(())
    }

    /// Sets the number of character classes required (clamped to 1..=4).
    #[must_use]
    pub fn min_character_classes(mut self, classes: u8) -> Self {
        self.min_character_classes = classes.clamp(1, 4);
        self
    }
}

/// Validates candidate accounts against a [`ValidationPolicy`].
///
/// Pure: performs no I/O and never mutates the candidate.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    /// Creates a validator with the given policy.
    #[must_use]
    pub const fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Checks a candidate account, returning the first rule it breaks.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first failed rule.
    pub fn validate_new(&self, candidate: &NewAccount) -> Result<(), ValidationError> {
        validate_identifier(&candidate.identifier)?;
        self.validate_secret(&candidate.secret)
    }

    /// Checks a secret against the strength policy.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first failed rule.
    pub fn validate_secret(&self, secret: &PlainSecret) -> Result<(), ValidationError> {
        if secret.is_empty() {
            return Err(ValidationError::EmptySecret);
        }

        let length = secret.char_len();
        if length < self.policy.min_secret_length {
            return Err(ValidationError::SecretTooShort {
                min: self.policy.min_secret_length,
            });
        }
        if length > self.policy.max_secret_length {
            return Err(ValidationError::SecretTooLong {
                max: self.policy.max_secret_length,
            });
        }

        let required = self.policy.min_character_classes.clamp(1, 4);
        if character_classes(secret.expose()) < required {
            return Err(ValidationError::SecretTooWeak { required });
        }

        Ok(())
    }
}

/// Checks that an identifier is a well-formed email address.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyIdentifier`] or
/// [`ValidationError::MalformedIdentifier`].
pub fn validate_identifier(identifier: &str) -> Result<(), ValidationError> {
    if identifier.is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }

    let malformed = || ValidationError::MalformedIdentifier(identifier.to_string());

    if identifier.len() > MAX_IDENTIFIER_LENGTH || !EMAIL.is_match(identifier) {
        return Err(malformed());
    }

    match identifier.split_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_PART_LENGTH => Ok(()),
        _ => Err(malformed()),
    }
}

/// Counts the distinct character classes present in a secret.
fn character_classes(secret: &str) -> u8 {
    let (mut lower, mut upper, mut digit, mut other) = (false, false, false, false);

    for c in secret.chars() {
        if c.is_lowercase() {
            lower = true;
        } else if c.is_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else {
            other = true;
        }
    }

    u8::from(lower) + u8::from(upper) + u8::from(digit) + u8::from(other)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        Validator::default()
    }

    #[test]
    fn accepts_valid_candidate() {
        let candidate = NewAccount::new("a@example.com", "Sup3rSecret!");
        assert_eq!(validator().validate_new(&candidate), Ok(()));
    }

    #[test]
    fn rejects_empty_identifier() {
        let candidate = NewAccount::new("", "Sup3rSecret!");
        assert_eq!(
            validator().validate_new(&candidate),
            Err(ValidationError::EmptyIdentifier)
        );
    }

    #[test]
    fn rejects_malformed_identifiers() {
        let bad = [
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@@example.com",
            "user@exa mple.com",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "user@-example.com",
            "user@example-.com",
            "user@example..com",
            " a@example.com",
        ];

        for identifier in bad {
            let candidate = NewAccount::new(identifier, "Sup3rSecret!");
            let err = validator().validate_new(&candidate).unwrap_err();
            assert!(
                matches!(err, ValidationError::MalformedIdentifier(_)),
                "{identifier} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn accepts_common_identifier_forms() {
        let good = [
            "a@example.com",
            "first.last@example.co.uk",
            "user+tag@sub.example.org",
            "UPPER@Example.COM",
            "o'brien@example.ie",
            "x@a-b.io",
        ];

        for identifier in good {
            assert_eq!(validate_identifier(identifier), Ok(()), "{identifier}");
        }
    }

    #[test]
    fn rejects_overlong_local_part() {
        let identifier = format!("{}@example.com", "a".repeat(65));
        assert!(matches!(
            validate_identifier(&identifier),
            Err(ValidationError::MalformedIdentifier(_))
        ));

        let identifier = format!("{}@example.com", "a".repeat(64));
        assert_eq!(validate_identifier(&identifier), Ok(()));
    }

    #[test]
    fn rejects_overlong_identifier() {
        let domain = format!("{}.com", vec!["a".repeat(60); 5].join("."));
        let identifier = format!("user@{domain}");
        assert!(identifier.len() > MAX_IDENTIFIER_LENGTH);
        assert!(validate_identifier(&identifier).is_err());
    }

    #[test]
    fn identifier_checked_before_secret() {
        let candidate = NewAccount::new("not-an-email", "");
        let err = validator().validate_new(&candidate).unwrap_err();
        assert!(err.is_identifier_error());
    }

    #[test]
    fn rejects_empty_secret() {
        let candidate = NewAccount::new("a@example.com", "");
        assert_eq!(
            validator().validate_new(&candidate),
            Err(ValidationError::EmptySecret)
        );
    }

    #[test]
    fn enforces_length_bounds() {
        let validator = Validator::new(
            ValidationPolicy::new()
                .min_secret_length(10)
                .max_secret_length(12),
        );

        assert_eq!(
            validator.validate_secret(&PlainSecret::new("short")),
            Err(ValidationError::SecretTooShort { min: 10 })
        );
        assert_eq!(
            validator.validate_secret(&PlainSecret::new("much-too-long-secret")),
            Err(ValidationError::SecretTooLong { max: 12 })
        );
        assert_eq!(validator.validate_secret(&PlainSecret::new("just-right!")), Ok(()));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let validator = Validator::new(ValidationPolicy::new().min_secret_length(4));
        // 4 characters, 8 bytes
        assert_eq!(validator.validate_secret(&PlainSecret::new("ääää")), Ok(()));
    }

    #[test]
    fn enforces_character_classes() {
        let validator = Validator::new(ValidationPolicy::new().min_character_classes(3));

        assert_eq!(
            validator.validate_secret(&PlainSecret::new("alllowercase")),
            Err(ValidationError::SecretTooWeak { required: 3 })
        );
        assert_eq!(validator.validate_secret(&PlainSecret::new("Mixed123case")), Ok(()));
    }

    #[test]
    fn error_messages_do_not_leak_secret() {
        let validator = Validator::new(ValidationPolicy::new().min_character_classes(4));
        let candidate = NewAccount::new("a@example.com", "onlylowercase");
        let err = validator.validate_new(&candidate).unwrap_err();

        assert!(!err.to_string().contains("onlylowercase"));
    }

    #[test]
    fn validation_does_not_mutate_candidate() {
        let candidate = NewAccount::new("a@example.com", "Sup3rSecret!");
        let _ = validator().validate_new(&candidate);

        assert_eq!(candidate.identifier, "a@example.com");
        assert_eq!(candidate.secret.expose(), "Sup3rSecret!");
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: ValidationPolicy =
            serde_json::from_str(r#"{"min_secret_length": 12}"#).unwrap();

        assert_eq!(policy.min_secret_length, 12);
        assert_eq!(policy.max_secret_length, DEFAULT_MAX_SECRET_LENGTH);
        assert_eq!(policy.min_character_classes, 1);
    }

    #[test]
    fn default_policy_is_consistent() {
        assert_eq!(ValidationPolicy::default().check(), Ok(()));
    }

    #[test]
    fn inverted_length_bounds_are_rejected() {
        let policy = ValidationPolicy::new().min_secret_length(300);

        assert_eq!(
            policy.check(),
            Err(PolicyError::LengthBoundsInverted { min: 300, max: 256 })
        );
    }

    #[test]
    fn impossible_policies_are_rejected() {
        let zero_max = ValidationPolicy::new().min_secret_length(0).max_secret_length(0);
        assert_eq!(zero_max.check(), Err(PolicyError::ZeroMaxLength));

        let classes: ValidationPolicy =
            serde_json::from_str(r#"{"min_character_classes": 5}"#).unwrap();
        assert_eq!(classes.check(), Err(PolicyError::CharacterClassesOutOfRange(5)));
    }
}
