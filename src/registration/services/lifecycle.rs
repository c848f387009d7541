//! Service layer for the registration lifecycle.
//!
//! Provides [`RegistrationService`] which coordinates account creation,
//! activation, administrator approval, activation-mail resending, and the
//! expiry sweep.

use crate::registration::{
    domain::{
        Account, ActivationToken, EmailAddress, ProfileId, RegistrationDomainError,
        RegistrationProfile, Site, Username,
    },
    ports::{
        DirectoryError, NewAccount, Notifier, NotifierError, ProfileRepository,
        ProfileRepositoryError, UserDirectory,
    },
    services::{ActivationPolicy, NotificationComposer, NotificationError, RegistrationConfig},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new account.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    joined_at: Option<DateTime<Utc>>,
    send_email: bool,
}

impl RegisterRequest {
    /// Creates a request with the mandatory identity fields.
    ///
    /// The activation email is sent by default.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            joined_at: None,
            send_email: true,
        }
    }

    /// Supplies an explicit join timestamp instead of the current instant.
    ///
    /// A timestamp more than the activation window in the past is reset to
    /// now at registration time, so an account can never be born expired.
    #[must_use]
    pub const fn with_joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = Some(joined_at);
        self
    }

    /// Suppresses the activation email.
    #[must_use]
    pub const fn without_activation_email(mut self) -> Self {
        self.send_email = false;
        self
    }
}

/// Outcome counters reported by the expiry sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Inactive, expired accounts deleted together with their profiles.
    pub deleted_accounts: u64,
    /// Profiles deleted because their owning account was already gone.
    pub deleted_orphans: u64,
}

/// Service-level errors for registration lifecycle operations.
///
/// The original system collapsed all of these into a boolean failure; the
/// taxonomy is kept explicit here, and `Result::is_ok` recovers the
/// boolean at any compatibility boundary.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The presented activation key is not 40 lowercase hex characters.
    /// Rejected before any storage lookup.
    #[error("activation key is malformed")]
    MalformedKey,

    /// No matching account, profile, or key was found.
    #[error("no matching registration was found")]
    NotFound,

    /// The activation window has fully elapsed.
    #[error("the activation window has elapsed")]
    Expired,

    /// The activation key was already consumed by a successful activation.
    #[error("the activation key has already been consumed")]
    AlreadyConsumed,

    /// The account is already activated; there is nothing to resend.
    #[error("the account is already activated")]
    AlreadyActivated,

    /// The registration has not completed the activation step yet.
    #[error("the registration has not completed activation")]
    NotActivated,

    /// The registration awaits administrator approval; the approval notice
    /// was re-sent, but there is nothing left for the account owner to do.
    #[error("the registration awaits administrator approval")]
    PendingAdminApproval,

    /// A registration profile already exists for the user.
    #[error("a registration profile already exists")]
    DuplicateProfile,

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RegistrationDomainError),

    /// The user directory failed.
    #[error(transparent)]
    Directory(DirectoryError),

    /// The profile repository failed.
    #[error(transparent)]
    Repository(ProfileRepositoryError),

    /// The notifier failed to hand a message to its transport.
    #[error(transparent)]
    Notifier(#[from] NotifierError),

    /// A notification template failed to render.
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl From<DirectoryError> for RegistrationError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(_) => Self::NotFound,
            other => Self::Directory(other),
        }
    }
}

impl From<ProfileRepositoryError> for RegistrationError {
    fn from(err: ProfileRepositoryError) -> Self {
        match err {
            ProfileRepositoryError::DuplicateProfile(_) => Self::DuplicateProfile,
            ProfileRepositoryError::NotFound(_) => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// Result type for registration lifecycle operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Registration lifecycle orchestration service.
#[derive(Clone)]
pub struct RegistrationService<D, P, N, C>
where
    D: UserDirectory,
    P: ProfileRepository,
    N: Notifier,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    profiles: Arc<P>,
    notifier: Arc<N>,
    clock: Arc<C>,
    config: Arc<RegistrationConfig>,
    composer: NotificationComposer,
}

impl<D, P, N, C> RegistrationService<D, P, N, C>
where
    D: UserDirectory,
    P: ProfileRepository,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a new registration service.
    #[must_use]
    pub fn new(
        directory: Arc<D>,
        profiles: Arc<P>,
        notifier: Arc<N>,
        clock: Arc<C>,
        config: RegistrationConfig,
    ) -> Self {
        let shared_config = Arc::new(config);
        Self {
            directory,
            profiles,
            notifier,
            clock,
            composer: NotificationComposer::new(Arc::clone(&shared_config)),
            config: shared_config,
        }
    }

    /// Returns the configuration the service was constructed with.
    #[must_use]
    pub fn config(&self) -> &RegistrationConfig {
        &self.config
    }

    /// Registers a new inactive account with a fresh registration profile.
    ///
    /// The account and profile creation are all-or-nothing: when the
    /// profile cannot be stored, the just-created account is deleted again
    /// before the error propagates. Sends the activation email unless the
    /// request suppresses it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Domain`] when identity fields fail
    /// validation, [`RegistrationError::DuplicateProfile`] when the user
    /// already has a profile, or a directory, repository, notification, or
    /// notifier error when a collaborator fails.
    pub async fn register(
        &self,
        request: RegisterRequest,
        site: &Site,
    ) -> RegistrationResult<Account> {
        let RegisterRequest {
            username,
            email,
            password,
            joined_at,
            send_email,
        } = request;

        let parsed_username = Username::new(username)?;
        let parsed_email = EmailAddress::new(email)?;
        let now = self.clock.utc();
        let effective_joined_at = joined_at.map_or(now, |supplied| {
            if now.signed_duration_since(supplied) > self.config.activation_window() {
                now
            } else {
                supplied
            }
        });

        let account = self
            .directory
            .create(NewAccount::new(
                parsed_username,
                parsed_email,
                password,
                effective_joined_at,
            ))
            .await?;

        let profile = match self.store_new_profile(&account).await {
            Ok(profile) => profile,
            Err(err) => {
                if let Err(cleanup_err) = self.directory.delete(account.id()).await {
                    tracing::warn!(
                        user_id = %account.id(),
                        error = %cleanup_err,
                        "failed to remove account after profile creation failure"
                    );
                }
                return Err(err);
            }
        };

        if send_email {
            self.send_activation_email(&account, &profile, site).await?;
        }

        tracing::info!(
            username = %account.username(),
            user_id = %account.id(),
            "inactive account registered"
        );
        Ok(account)
    }

    /// Creates a registration profile for an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::DuplicateProfile`] when the account
    /// already has a profile, or a repository error when persistence fails.
    pub async fn create_profile(
        &self,
        account: &Account,
    ) -> RegistrationResult<RegistrationProfile> {
        self.store_new_profile(account).await
    }

    /// Activates the registration matching the presented key and returns
    /// the owning account.
    ///
    /// Under [`ActivationPolicy::SelfService`] the account becomes active
    /// and the key is consumed. Under [`ActivationPolicy::AdminApproval`]
    /// the profile is marked activated, the administrators are notified,
    /// and the account stays inactive until approved.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::MalformedKey`] (before any lookup),
    /// [`RegistrationError::NotFound`], [`RegistrationError::Expired`], or
    /// [`RegistrationError::AlreadyConsumed`] when the key cannot activate
    /// anything, or a collaborator error when persistence or notification
    /// fails.
    pub async fn activate(&self, activation_key: &str, site: &Site) -> RegistrationResult<Account> {
        let (account, _profile) = self.activate_inner(activation_key, site).await?;
        Ok(account)
    }

    /// Activates the registration matching the presented key and returns
    /// the profile instead of the account.
    ///
    /// # Errors
    ///
    /// Same as [`RegistrationService::activate`].
    pub async fn activate_profile(
        &self,
        activation_key: &str,
        site: &Site,
    ) -> RegistrationResult<RegistrationProfile> {
        let (_account, profile) = self.activate_inner(activation_key, site).await?;
        Ok(profile)
    }

    /// Approves an activated registration, making the account usable.
    ///
    /// Only meaningful under [`ActivationPolicy::AdminApproval`].
    /// Idempotent: approving an already-approved registration re-returns
    /// the account.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotFound`] for an unknown profile,
    /// [`RegistrationError::NotActivated`] when the owner has not presented
    /// a valid key yet, or a collaborator error when persistence or
    /// notification fails.
    pub async fn approve(&self, profile_id: ProfileId, site: &Site) -> RegistrationResult<Account> {
        let profile = self
            .profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(RegistrationError::NotFound)?;

        if !profile.is_activated() {
            return Err(RegistrationError::NotActivated);
        }

        let account = self.directory.set_active(profile.user_id(), true).await?;
        self.send_approval_complete_email(&account, site).await?;

        tracing::info!(
            username = %account.username(),
            profile_id = %profile.id(),
            "registration approved"
        );
        Ok(account)
    }

    /// Re-sends the activation email with a freshly rotated key.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotFound`] for an unknown address,
    /// [`RegistrationError::AlreadyActivated`] when there is nothing to
    /// resend, [`RegistrationError::PendingAdminApproval`] when the
    /// registration only awaits approval (the approval notice is re-sent
    /// to the administrators as a side effect), or
    /// [`RegistrationError::Expired`] when only re-registration can help.
    pub async fn resend_activation(&self, email: &str, site: &Site) -> RegistrationResult<()> {
        let parsed_email = EmailAddress::new(email)?;
        let account = self
            .directory
            .find_by_email(&parsed_email)
            .await?
            .ok_or(RegistrationError::NotFound)?;
        let mut profile = self
            .profiles
            .find_by_user(account.id())
            .await?
            .ok_or(RegistrationError::NotFound)?;

        if profile.is_activated() {
            if self.config.policy() == ActivationPolicy::AdminApproval && !account.is_active() {
                self.send_admin_approval_request(&account, &profile, site)
                    .await?;
                return Err(RegistrationError::PendingAdminApproval);
            }
            return Err(RegistrationError::AlreadyActivated);
        }

        if profile.is_expired(
            account.joined_at(),
            self.config.activation_window(),
            &*self.clock,
        ) {
            return Err(RegistrationError::Expired);
        }

        profile.renew_key(&*self.clock);
        self.profiles.update(&profile).await?;
        self.send_activation_email(&account, &profile, site).await?;

        tracing::info!(
            username = %account.username(),
            "activation email re-sent with a rotated key"
        );
        Ok(())
    }

    /// Deletes every inactive account whose activation window has elapsed,
    /// cascading the profile; orphaned profiles are deleted directly.
    ///
    /// Sends no notifications. Intended to be invoked by an external
    /// trigger; the service performs no scheduling itself.
    ///
    /// # Errors
    ///
    /// Returns a repository or directory error when a lookup or delete
    /// fails; rows already processed stay deleted.
    pub async fn sweep_expired(&self) -> RegistrationResult<SweepOutcome> {
        let window = self.config.activation_window();
        let mut outcome = SweepOutcome::default();

        for profile in self.profiles.list_all().await? {
            match self.directory.find_by_id(profile.user_id()).await? {
                None => {
                    self.profiles.delete(profile.id()).await?;
                    outcome.deleted_orphans += 1;
                }
                Some(account) => {
                    if !account.is_active()
                        && profile.is_expired(account.joined_at(), window, &*self.clock)
                    {
                        self.directory.delete(account.id()).await?;
                        self.profiles.delete(profile.id()).await?;
                        outcome.deleted_accounts += 1;
                    }
                }
            }
        }

        tracing::info!(
            deleted_accounts = outcome.deleted_accounts,
            deleted_orphans = outcome.deleted_orphans,
            "expired registrations swept"
        );
        Ok(outcome)
    }

    /// Composes and sends the activation email for a registration.
    ///
    /// # Errors
    ///
    /// Returns a notification error when a template fails to render, or a
    /// notifier error when the transport rejects the message.
    pub async fn send_activation_email(
        &self,
        account: &Account,
        profile: &RegistrationProfile,
        site: &Site,
    ) -> RegistrationResult<()> {
        let message = self.composer.activation_email(account, profile, site)?;
        self.notifier.send(&message).await?;
        Ok(())
    }

    /// Composes and sends the approval-request notice to the configured
    /// administrators.
    ///
    /// # Errors
    ///
    /// Returns a notification error when a template fails to render, or a
    /// notifier error when the transport rejects the message.
    pub async fn send_admin_approval_request(
        &self,
        account: &Account,
        profile: &RegistrationProfile,
        site: &Site,
    ) -> RegistrationResult<()> {
        let message = self
            .composer
            .admin_approval_request(account, profile, site)?;
        self.notifier.send(&message).await?;
        Ok(())
    }

    /// Composes and sends the approval-complete notice to an account.
    ///
    /// # Errors
    ///
    /// Returns a notification error when a template fails to render, or a
    /// notifier error when the transport rejects the message.
    pub async fn send_approval_complete_email(
        &self,
        account: &Account,
        site: &Site,
    ) -> RegistrationResult<()> {
        let message = self.composer.approval_complete(account, site)?;
        self.notifier.send(&message).await?;
        Ok(())
    }

    async fn activate_inner(
        &self,
        activation_key: &str,
        site: &Site,
    ) -> RegistrationResult<(Account, RegistrationProfile)> {
        let token = ActivationToken::parse(activation_key)
            .map_err(|_| RegistrationError::MalformedKey)?;

        let mut profile = self
            .profiles
            .find_by_token(&token)
            .await?
            .ok_or(RegistrationError::NotFound)?;

        if profile.is_activated() {
            return Err(RegistrationError::AlreadyConsumed);
        }

        let account = self
            .directory
            .find_by_id(profile.user_id())
            .await?
            .ok_or(RegistrationError::NotFound)?;

        if profile.is_expired(
            account.joined_at(),
            self.config.activation_window(),
            &*self.clock,
        ) {
            return Err(RegistrationError::Expired);
        }

        match self.config.policy() {
            ActivationPolicy::SelfService => {
                profile.consume_key();
                self.profiles.update(&profile).await?;
                let activated_account = self.directory.set_active(account.id(), true).await?;
                tracing::info!(
                    username = %activated_account.username(),
                    "account activated"
                );
                Ok((activated_account, profile))
            }
            ActivationPolicy::AdminApproval => {
                profile.mark_activated();
                self.profiles.update(&profile).await?;
                self.send_admin_approval_request(&account, &profile, site)
                    .await?;
                tracing::info!(
                    username = %account.username(),
                    "account activated, awaiting administrator approval"
                );
                Ok((account, profile))
            }
        }
    }

    async fn store_new_profile(
        &self,
        account: &Account,
    ) -> RegistrationResult<RegistrationProfile> {
        let profile = RegistrationProfile::new(account.id(), &*self.clock);
        self.profiles.store(&profile).await?;
        Ok(profile)
    }
}
