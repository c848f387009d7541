//! In-memory registration profile repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::registration::{
    domain::{ActivationToken, ProfileId, RegistrationProfile, UserId},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

/// Thread-safe in-memory profile repository.
///
/// Token lookups are counted so tests can observe that malformed keys are
/// rejected before any storage access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<RwLock<InMemoryProfileState>>,
    token_lookups: Arc<AtomicU64>,
}

#[derive(Debug, Default)]
struct InMemoryProfileState {
    profiles: HashMap<ProfileId, RegistrationProfile>,
    user_index: HashMap<UserId, ProfileId>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many token lookups have reached this repository.
    #[must_use]
    pub fn token_lookups(&self) -> u64 {
        self.token_lookups.load(Ordering::Relaxed)
    }

    /// Returns the number of stored profiles.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn count(&self) -> ProfileRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.profiles.len())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn store(&self, profile: &RegistrationProfile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.user_index.contains_key(&profile.user_id()) {
            return Err(ProfileRepositoryError::DuplicateProfile(profile.user_id()));
        }

        state.user_index.insert(profile.user_id(), profile.id());
        state.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &RegistrationProfile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if !state.profiles.contains_key(&profile.id()) {
            return Err(ProfileRepositoryError::NotFound(profile.id()));
        }

        state.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ProfileId,
    ) -> ProfileRepositoryResult<Option<RegistrationProfile>> {
        let state = self.state.read().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.profiles.get(&id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> ProfileRepositoryResult<Option<RegistrationProfile>> {
        let state = self.state.read().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let profile = state
            .user_index
            .get(&user_id)
            .and_then(|id| state.profiles.get(id))
            .cloned();
        Ok(profile)
    }

    async fn find_by_token(
        &self,
        token: &ActivationToken,
    ) -> ProfileRepositoryResult<Option<RegistrationProfile>> {
        self.token_lookups.fetch_add(1, Ordering::Relaxed);
        let state = self.state.read().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let profile = state
            .profiles
            .values()
            .find(|candidate| candidate.pending_token() == Some(token))
            .cloned();
        Ok(profile)
    }

    async fn list_all(&self) -> ProfileRepositoryResult<Vec<RegistrationProfile>> {
        let state = self.state.read().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.profiles.values().cloned().collect())
    }

    async fn delete(&self, id: ProfileId) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if let Some(removed) = state.profiles.remove(&id) {
            state.user_index.remove(&removed.user_id());
        }
        Ok(())
    }
}
