//! Domain model for the registration lifecycle.
//!
//! The registration domain models the single-use activation key, the
//! profile aggregate that carries it, and the directory account snapshot
//! the lifecycle operates on. All infrastructure concerns are kept outside
//! the domain boundary.

mod account;
mod activation_key;
mod email;
mod error;
mod ids;
mod profile;
mod site;
mod username;

pub use account::Account;
pub use activation_key::{ActivationKey, ActivationToken};
pub use email::EmailAddress;
pub use error::{ParseActivationKeyError, RegistrationDomainError};
pub use ids::{ProfileId, UserId};
pub use profile::{PersistedProfileData, RegistrationProfile};
pub use site::Site;
pub use username::Username;
