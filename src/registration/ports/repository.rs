//! Repository port for registration profile persistence.

use crate::registration::domain::{ActivationToken, ProfileId, RegistrationProfile, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Registration profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores a new profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateProfile`] when the user
    /// already has a profile; the repository enforces the one-profile-per-
    /// user invariant.
    async fn store(&self, profile: &RegistrationProfile) -> ProfileRepositoryResult<()>;

    /// Persists changes to an existing profile (key state, activated flag).
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when the profile does
    /// not exist.
    async fn update(&self, profile: &RegistrationProfile) -> ProfileRepositoryResult<()>;

    /// Finds a profile by identifier.
    ///
    /// Returns `None` when the profile does not exist.
    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<RegistrationProfile>>;

    /// Finds the profile owned by a user.
    ///
    /// Returns `None` when the user has no profile.
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> ProfileRepositoryResult<Option<RegistrationProfile>>;

    /// Finds a profile by exact pending-token match.
    ///
    /// Returns `None` when no profile carries the token. Consumed keys are
    /// unreachable through this lookup: the stored sentinel never equals a
    /// token.
    async fn find_by_token(
        &self,
        token: &ActivationToken,
    ) -> ProfileRepositoryResult<Option<RegistrationProfile>>;

    /// Returns every stored profile. Used by the expiry sweep.
    async fn list_all(&self) -> ProfileRepositoryResult<Vec<RegistrationProfile>>;

    /// Deletes a profile. Deleting a missing profile is a no-op.
    async fn delete(&self, id: ProfileId) -> ProfileRepositoryResult<()>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// A profile already exists for the user.
    #[error("a registration profile already exists for user {0}")]
    DuplicateProfile(UserId),

    /// The profile was not found.
    #[error("registration profile not found: {0}")]
    NotFound(ProfileId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
