//! Port contracts for the registration lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by the
//! registration services: the external user directory, the profile
//! repository, and the outbound notifier.

pub mod directory;
pub mod notifier;
pub mod repository;

pub use directory::{DirectoryError, DirectoryResult, NewAccount, UserDirectory};
pub use notifier::{EmailMessage, Notifier, NotifierError, NotifierResult};
pub use repository::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult};
