//! Password hashing shared by user directory adapters.
//!
//! Credentials never leave the directory: adapters hash on create and
//! verify on demand. The registration core sees passwords only as opaque
//! pass-through strings.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Error returned when a credential cannot be hashed or parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("credential processing failed: {0}")]
pub struct CredentialError(String);

/// Hashes a password with Argon2 and a fresh salt.
///
/// # Errors
///
/// Returns [`CredentialError`] when hashing fails.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CredentialError(err.to_string()))
}

/// Verifies a candidate password against a stored hash.
///
/// # Errors
///
/// Returns [`CredentialError`] when the stored hash cannot be parsed.
pub fn verify_password(candidate: &str, stored_hash: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| CredentialError(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok())
}
