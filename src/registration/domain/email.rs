//! Validated email address type.

use super::RegistrationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for an email address, matching the `VARCHAR(254)` column.
const MAX_EMAIL_LENGTH: usize = 254;

/// Validated notification-capable email address.
///
/// Validation is deliberately shallow: a single `@` separating non-empty
/// local and domain parts. Deliverability is the notifier's problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationDomainError::EmptyEmailAddress`] when the value
    /// is empty after trimming,
    /// [`RegistrationDomainError::InvalidEmailAddress`] when it is not of
    /// the form `local@domain`, or
    /// [`RegistrationDomainError::EmailAddressTooLong`] when it exceeds 254
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, RegistrationDomainError> {
        let raw = value.into();
        let trimmed = raw.trim().to_owned();

        if trimmed.is_empty() {
            return Err(RegistrationDomainError::EmptyEmailAddress);
        }

        if trimmed.len() > MAX_EMAIL_LENGTH {
            return Err(RegistrationDomainError::EmailAddressTooLong(raw));
        }

        let mut parts = trimmed.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || parts.next().is_some() {
            return Err(RegistrationDomainError::InvalidEmailAddress(raw));
        }

        Ok(Self(trimmed))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
