//! Directory account snapshot used by the registration core.

use super::{EmailAddress, UserId, Username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a user directory account.
///
/// The directory owns account identity and credentials; the registration
/// core only reads this snapshot, flips the active flag through the
/// directory port, and compares the join timestamp against the activation
/// window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: UserId,
    username: Username,
    email: EmailAddress,
    is_active: bool,
    joined_at: DateTime<Utc>,
}

impl Account {
    /// Creates an account snapshot from directory data.
    #[must_use]
    pub const fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        is_active: bool,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            is_active,
            joined_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the account username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the account email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns true when the account may sign in.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the join timestamp the activation window is measured from.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}
