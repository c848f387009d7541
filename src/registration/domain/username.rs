//! Validated account username type.

use super::RegistrationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username, matching the `VARCHAR(150)` column.
const MAX_USERNAME_LENGTH: usize = 150;

/// Validated directory username.
///
/// Usernames are the unique identifying field of a directory account and
/// accept letters, digits and the `@.+-_` punctuation set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// The input is trimmed; case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationDomainError::EmptyUsername`] when the value is
    /// empty after trimming, [`RegistrationDomainError::InvalidUsername`]
    /// when it contains characters outside the permitted set, or
    /// [`RegistrationDomainError::UsernameTooLong`] when it exceeds 150
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, RegistrationDomainError> {
        let raw = value.into();
        let trimmed = raw.trim().to_owned();

        if trimmed.is_empty() {
            return Err(RegistrationDomainError::EmptyUsername);
        }

        if trimmed.len() > MAX_USERNAME_LENGTH {
            return Err(RegistrationDomainError::UsernameTooLong(raw));
        }

        let is_valid = trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));

        if !is_valid {
            return Err(RegistrationDomainError::InvalidUsername(raw));
        }

        Ok(Self(trimmed))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
