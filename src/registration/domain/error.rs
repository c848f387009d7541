//! Error types for registration domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing registration domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationDomainError {
    /// The candidate activation key is not 40 lowercase hex characters.
    #[error("activation key must be 40 lowercase hexadecimal characters")]
    MalformedActivationKey,

    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username contains characters outside the permitted set.
    #[error("username '{0}' contains invalid characters (letters, digits and @.+-_ allowed)")]
    InvalidUsername(String),

    /// The username exceeds the 150-character storage limit.
    #[error("username exceeds 150 character limit: {0}")]
    UsernameTooLong(String),

    /// The email address is empty after trimming.
    #[error("email address must not be empty")]
    EmptyEmailAddress,

    /// The email address is not of the form `local@domain`.
    #[error("email address '{0}' is not of the form local@domain")]
    InvalidEmailAddress(String),

    /// The email address exceeds the 254-character storage limit.
    #[error("email address exceeds 254 character limit: {0}")]
    EmailAddressTooLong(String),
}

/// Error returned while parsing a stored activation key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("stored activation key is neither a token nor the consumed sentinel: {0}")]
pub struct ParseActivationKeyError(pub String);
