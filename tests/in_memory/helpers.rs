//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::Arc;

use vestibule::registration::{
    adapters::memory::{InMemoryProfileRepository, InMemoryUserDirectory, RecordingNotifier},
    domain::Site,
    services::{
        ActivationPolicy, AdminContact, RegisterRequest, RegistrationConfig, RegistrationService,
    },
};

/// Clock pinned to an explicit instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    #[must_use]
    pub const fn at(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.instant.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Service type wired to the in-memory adapters.
pub type TestService = RegistrationService<
    InMemoryUserDirectory,
    InMemoryProfileRepository,
    RecordingNotifier,
    FixedClock,
>;

/// Shared adapter set allowing services at different instants.
#[derive(Clone)]
pub struct Harness {
    /// In-memory user directory.
    pub directory: Arc<InMemoryUserDirectory>,
    /// In-memory profile repository.
    pub profiles: Arc<InMemoryProfileRepository>,
    /// Recording outbox notifier.
    pub outbox: Arc<RecordingNotifier>,
    config: RegistrationConfig,
}

impl Harness {
    /// Creates a harness over fresh adapters.
    #[must_use]
    pub fn new(config: RegistrationConfig) -> Self {
        Self {
            directory: Arc::new(InMemoryUserDirectory::new()),
            profiles: Arc::new(InMemoryProfileRepository::new()),
            outbox: Arc::new(RecordingNotifier::new()),
            config,
        }
    }

    /// Builds a service whose clock reads the base instant.
    #[must_use]
    pub fn service(&self) -> TestService {
        self.service_at(base_time())
    }

    /// Builds a service whose clock reads the given instant.
    #[must_use]
    pub fn service_at(&self, instant: DateTime<Utc>) -> TestService {
        RegistrationService::new(
            Arc::clone(&self.directory),
            Arc::clone(&self.profiles),
            Arc::clone(&self.outbox),
            Arc::new(FixedClock::at(instant)),
            self.config.clone(),
        )
    }
}

/// The instant all tests measure from.
#[must_use]
pub fn base_time() -> DateTime<Utc> {
    "2024-05-04T10:00:00Z".parse().expect("valid timestamp")
}

/// Self-service configuration with a seven-day window.
#[must_use]
pub fn standard_config() -> RegistrationConfig {
    RegistrationConfig::new(7, "site@example.com").with_from_address("registration@example.com")
}

/// Admin-approval configuration with one administrator.
#[must_use]
pub fn supervised_config() -> RegistrationConfig {
    standard_config()
        .with_policy(ActivationPolicy::AdminApproval)
        .with_admins([AdminContact::new("Ops", "ops@example.com")])
}

/// Registration request for the canonical test account.
#[must_use]
pub fn alice_request() -> RegisterRequest {
    RegisterRequest::new("alice", "alice@example.com", "swordfish")
}

/// Site context used across tests.
#[must_use]
pub fn site() -> Site {
    Site::new("example.com", "example.com")
}
