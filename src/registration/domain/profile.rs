//! Registration profile aggregate root.

use super::{ActivationKey, ActivationToken, ProfileId, UserId};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Registration profile aggregate root.
///
/// One profile exists per directory account while its registration is in
/// flight. The profile carries the single-use activation key and the
/// `activated` flag that records whether the owner has proven control of
/// their address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationProfile {
    id: ProfileId,
    user_id: UserId,
    activation_key: ActivationKey,
    activated: bool,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Persisted profile identifier.
    pub id: ProfileId,
    /// Persisted owning account identifier.
    pub user_id: UserId,
    /// Persisted activation key state.
    pub activation_key: ActivationKey,
    /// Persisted activation flag.
    pub activated: bool,
}

impl RegistrationProfile {
    /// Creates a new profile with a freshly issued activation key.
    #[must_use]
    pub fn new(user_id: UserId, clock: &impl Clock) -> Self {
        Self {
            id: ProfileId::new(),
            user_id,
            activation_key: ActivationKey::issue(user_id, clock),
            activated: false,
        }
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            activation_key: data.activation_key,
            activated: data.activated,
        }
    }

    /// Returns the profile identifier.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the owning account identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the activation key state.
    #[must_use]
    pub const fn activation_key(&self) -> &ActivationKey {
        &self.activation_key
    }

    /// Returns true once activation has reached its terminal success state.
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Marks the profile activated and consumes the key to the sentinel.
    ///
    /// Self-service activation: the token becomes unusable the moment it
    /// succeeds.
    pub fn consume_key(&mut self) {
        self.activated = true;
        self.activation_key = ActivationKey::Consumed;
    }

    /// Marks the profile activated while keeping the key intact.
    ///
    /// Supervised activation: the account stays inactive until an
    /// administrator approves it.
    pub fn mark_activated(&mut self) {
        self.activated = true;
    }

    /// Replaces the pending key with a freshly issued token.
    pub fn renew_key(&mut self, clock: &impl Clock) {
        self.activation_key = ActivationKey::issue(self.user_id, clock);
    }

    /// Returns true when the profile can no longer be activated.
    ///
    /// A profile is expired once its key has been consumed, or once the
    /// activation window measured from the account's join timestamp has
    /// fully elapsed. The boundary instant counts as expired.
    #[must_use]
    pub fn is_expired(
        &self,
        joined_at: DateTime<Utc>,
        window: Duration,
        clock: &impl Clock,
    ) -> bool {
        self.activation_key.is_consumed() || joined_at + window <= clock.utc()
    }

    /// Returns the pending token, if the key has not been consumed.
    #[must_use]
    pub const fn pending_token(&self) -> Option<&ActivationToken> {
        self.activation_key.token()
    }
}
