//! `PostgreSQL` adapters for registration persistence.

mod directory;
mod models;
mod profiles;
mod schema;

pub use directory::{PostgresUserDirectory, RegistrationPgPool};
pub use profiles::PostgresProfileRepository;
