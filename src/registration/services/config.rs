//! Construction-time configuration for the registration service.

use chrono::Duration;

/// How presenting a valid activation key completes a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationPolicy {
    /// Presenting a valid key immediately activates the account.
    #[default]
    SelfService,
    /// Key presentation marks the account ready; an administrator must
    /// approve it before it becomes usable.
    AdminApproval,
}

/// Administrator contact notified under the admin-approval policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContact {
    name: String,
    address: String,
}

impl AdminContact {
    /// Creates an administrator contact.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Returns the administrator's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the administrator's email address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Registration configuration, passed to the service at construction.
///
/// Replaces the ambient settings registry of the original system: the
/// activation window, sender addresses, HTML toggle, administrator list,
/// and activation policy are all explicit here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationConfig {
    activation_window_days: i64,
    default_from_address: String,
    from_address: Option<String>,
    html_email: bool,
    admins: Vec<AdminContact>,
    policy: ActivationPolicy,
}

impl RegistrationConfig {
    /// Creates a configuration with the given activation window and global
    /// fallback sender address.
    ///
    /// HTML alternatives are enabled by default; the policy defaults to
    /// self-service activation.
    #[must_use]
    pub fn new(activation_window_days: i64, default_from_address: impl Into<String>) -> Self {
        Self {
            activation_window_days,
            default_from_address: default_from_address.into(),
            from_address: None,
            html_email: true,
            admins: Vec::new(),
            policy: ActivationPolicy::default(),
        }
    }

    /// Sets the registration-specific sender override.
    #[must_use]
    pub fn with_from_address(mut self, address: impl Into<String>) -> Self {
        self.from_address = Some(address.into());
        self
    }

    /// Enables or disables HTML alternative bodies.
    #[must_use]
    pub const fn with_html_email(mut self, enabled: bool) -> Self {
        self.html_email = enabled;
        self
    }

    /// Sets the administrator contact list.
    #[must_use]
    pub fn with_admins(mut self, admins: impl IntoIterator<Item = AdminContact>) -> Self {
        self.admins = admins.into_iter().collect();
        self
    }

    /// Sets the activation policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ActivationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the activation window length in days.
    #[must_use]
    pub const fn activation_window_days(&self) -> i64 {
        self.activation_window_days
    }

    /// Returns the activation window as a duration.
    #[must_use]
    pub fn activation_window(&self) -> Duration {
        Duration::days(self.activation_window_days)
    }

    /// Returns the sender address, preferring the registration-specific
    /// override over the global fallback.
    #[must_use]
    pub fn effective_from_address(&self) -> &str {
        self.from_address
            .as_deref()
            .unwrap_or(&self.default_from_address)
    }

    /// Returns true when HTML alternative bodies are enabled.
    #[must_use]
    pub const fn html_email(&self) -> bool {
        self.html_email
    }

    /// Returns the administrator contact list.
    #[must_use]
    pub fn admins(&self) -> &[AdminContact] {
        &self.admins
    }

    /// Returns the activation policy.
    #[must_use]
    pub const fn policy(&self) -> ActivationPolicy {
        self.policy
    }
}
