//! Application services for the registration lifecycle.

mod config;
mod lifecycle;
mod notifications;

pub use config::{ActivationPolicy, AdminContact, RegistrationConfig};
pub use lifecycle::{
    RegisterRequest, RegistrationError, RegistrationResult, RegistrationService, SweepOutcome,
};
pub use notifications::{NotificationComposer, NotificationError};
