//! Error types for news domain validation.

use thiserror::Error;

/// Errors returned while constructing news domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NewsDomainError {
    /// The column name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// The article title is empty after trimming.
    #[error("article title must not be empty")]
    EmptyArticleTitle,

    /// The slug is empty after trimming.
    #[error("slug must not be empty")]
    EmptySlug,

    /// The slug contains characters that cannot appear in a URL segment.
    #[error("slug '{0}' contains invalid characters (letters, digits, - and _ allowed)")]
    InvalidSlug(String),

    /// The slug exceeds the 256-character storage limit.
    #[error("slug exceeds 256 character limit: {0}")]
    SlugTooLong(String),
}
