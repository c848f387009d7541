//! URL slug value type.

use super::NewsDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a slug, matching the `VARCHAR(256)` column.
const MAX_SLUG_LENGTH: usize = 256;

/// Validated URL segment identifying a column or article.
///
/// Uniqueness is by convention only; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Creates a validated slug.
    ///
    /// # Errors
    ///
    /// Returns [`NewsDomainError::EmptySlug`] when the value is empty
    /// after trimming, [`NewsDomainError::InvalidSlug`] when it contains
    /// characters outside letters, digits, `-` and `_`, or
    /// [`NewsDomainError::SlugTooLong`] when it exceeds 256 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, NewsDomainError> {
        let raw = value.into();
        let trimmed = raw.trim().to_owned();

        if trimmed.is_empty() {
            return Err(NewsDomainError::EmptySlug);
        }

        if trimmed.len() > MAX_SLUG_LENGTH {
            return Err(NewsDomainError::SlugTooLong(raw));
        }

        let is_valid = trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_'));

        if !is_valid {
            return Err(NewsDomainError::InvalidSlug(raw));
        }

        Ok(Self(trimmed))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
