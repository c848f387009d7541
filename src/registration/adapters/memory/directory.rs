//! In-memory user directory for registration tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::registration::{
    adapters::credentials,
    domain::{Account, EmailAddress, UserId},
    ports::{DirectoryError, DirectoryResult, NewAccount, UserDirectory},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    accounts: HashMap<UserId, StoredAccount>,
    username_index: HashMap<String, UserId>,
    email_index: HashMap<String, UserId>,
}

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password_hash: String,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn create(&self, account: NewAccount) -> DirectoryResult<Account> {
        let password_hash =
            credentials::hash_password(account.password()).map_err(DirectoryError::persistence)?;

        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;

        let username_key = account.username().as_str().to_owned();
        if state.username_index.contains_key(&username_key) {
            return Err(DirectoryError::DuplicateUsername(account.username().clone()));
        }

        let created = Account::new(
            UserId::new(),
            account.username().clone(),
            account.email().clone(),
            false,
            account.joined_at(),
        );

        state.username_index.insert(username_key, created.id());
        state
            .email_index
            .entry(created.email().as_str().to_owned())
            .or_insert(created.id());
        state.accounts.insert(
            created.id(),
            StoredAccount {
                account: created.clone(),
                password_hash,
            },
        );
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<Account>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.accounts.get(&id).map(|stored| stored.account.clone()))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> DirectoryResult<Option<Account>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        let found = state
            .email_index
            .get(email.as_str())
            .and_then(|id| state.accounts.get(id))
            .map(|stored| stored.account.clone());
        Ok(found)
    }

    async fn set_active(&self, id: UserId, active: bool) -> DirectoryResult<Account> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        let stored = state
            .accounts
            .get_mut(&id)
            .ok_or(DirectoryError::NotFound(id))?;
        stored.account = Account::new(
            stored.account.id(),
            stored.account.username().clone(),
            stored.account.email().clone(),
            active,
            stored.account.joined_at(),
        );
        Ok(stored.account.clone())
    }

    async fn verify_password(&self, id: UserId, candidate: &str) -> DirectoryResult<bool> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        let stored = state.accounts.get(&id).ok_or(DirectoryError::NotFound(id))?;
        credentials::verify_password(candidate, &stored.password_hash)
            .map_err(DirectoryError::persistence)
    }

    async fn delete(&self, id: UserId) -> DirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        if let Some(stored) = state.accounts.remove(&id) {
            state.username_index.remove(stored.account.username().as_str());
            if state.email_index.get(stored.account.email().as_str()) == Some(&id) {
                state.email_index.remove(stored.account.email().as_str());
            }
        }
        Ok(())
    }
}
