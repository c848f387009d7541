//! User directory port: the external store of account identity.

use crate::registration::domain::{Account, EmailAddress, UserId, Username};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Payload for creating a directory account.
///
/// The password travels through this port exactly once; adapters hash it
/// before storage and never hand it back.
#[derive(Debug, Clone)]
pub struct NewAccount {
    username: Username,
    email: EmailAddress,
    password: String,
    joined_at: DateTime<Utc>,
}

impl NewAccount {
    /// Creates an account payload. Accounts are always created inactive.
    #[must_use]
    pub const fn new(
        username: Username,
        email: EmailAddress,
        password: String,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            password,
            joined_at,
        }
    }

    /// Returns the requested username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the requested email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the raw password to be hashed by the adapter.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the join timestamp to record.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}

/// User directory persistence contract.
///
/// The directory is authoritative for identity and credentials; the
/// registration core only creates inactive accounts, flips the active
/// flag, and deletes accounts reaped by the expiry sweep.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Creates a new inactive account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateUsername`] when the identifying
    /// field is already taken.
    async fn create(&self, account: NewAccount) -> DirectoryResult<Account>;

    /// Finds an account by identifier.
    ///
    /// Returns `None` when the account does not exist.
    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<Account>>;

    /// Finds an account by email address.
    ///
    /// Returns `None` when no account uses the given address.
    async fn find_by_email(&self, email: &EmailAddress) -> DirectoryResult<Option<Account>>;

    /// Sets the active flag and returns the updated account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] when the account does not
    /// exist.
    async fn set_active(&self, id: UserId, active: bool) -> DirectoryResult<Account>;

    /// Checks a candidate password against the stored credential.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] when the account does not
    /// exist.
    async fn verify_password(&self, id: UserId, candidate: &str) -> DirectoryResult<bool>;

    /// Deletes an account. Deleting a missing account is a no-op.
    async fn delete(&self, id: UserId) -> DirectoryResult<()>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// An account with the same username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// The account was not found.
    #[error("account not found: {0}")]
    NotFound(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
