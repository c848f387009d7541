//! Single-use activation token and its consumed sentinel.

use super::{ParseActivationKeyError, RegistrationDomainError, UserId};
use mockable::Clock;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of an issued activation token in hex characters.
const TOKEN_LENGTH: usize = 40;

/// Validated 40-character lowercase hexadecimal activation token.
///
/// Tokens are opaque: they are a truncated SHA-256 digest over fresh
/// randomness, the issuing instant, and the owning user identifier, so a
/// token cannot be reproduced from public data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationToken(String);

impl ActivationToken {
    /// Generates a fresh token for the given user.
    #[must_use]
    pub fn generate(user_id: UserId, clock: &impl Clock) -> Self {
        let mut entropy = [0_u8; 32];
        rand::rng().fill_bytes(&mut entropy);

        let mut hasher = Sha256::new();
        hasher.update(entropy);
        hasher.update(clock.utc().to_rfc3339().as_bytes());
        hasher.update(user_id.into_inner().as_bytes());

        let mut digest_hex = to_lower_hex(hasher.finalize().as_slice());
        digest_hex.truncate(TOKEN_LENGTH);
        Self(digest_hex)
    }

    /// Parses a candidate token presented by a caller.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationDomainError::MalformedActivationKey`] when the
    /// candidate is not exactly 40 lowercase hexadecimal characters. Shape
    /// validation happens before any storage access, so malformed keys never
    /// reach a repository.
    pub fn parse(candidate: &str) -> Result<Self, RegistrationDomainError> {
        if candidate.len() != TOKEN_LENGTH || !candidate.chars().all(is_lower_hex) {
            return Err(RegistrationDomainError::MalformedActivationKey);
        }
        Ok(Self(candidate.to_owned()))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ActivationToken {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ActivationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Activation key state carried by a registration profile.
///
/// A key is either a pending token awaiting presentation, or the consumed
/// sentinel written after successful self-service activation. The sentinel
/// never matches the token shape, so a consumed key can never be looked up
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationKey {
    /// An issued token that has not been consumed yet.
    Pending(ActivationToken),
    /// The key was consumed by a successful activation.
    Consumed,
}

impl ActivationKey {
    /// Canonical storage representation of the consumed state.
    pub const CONSUMED_SENTINEL: &'static str = "ALREADY_ACTIVATED";

    /// Issues a fresh pending key for the given user.
    #[must_use]
    pub fn issue(user_id: UserId, clock: &impl Clock) -> Self {
        Self::Pending(ActivationToken::generate(user_id, clock))
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending(token) => token.as_str(),
            Self::Consumed => Self::CONSUMED_SENTINEL,
        }
    }

    /// Returns true when the key has been consumed.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed)
    }

    /// Returns the pending token, if the key has not been consumed.
    #[must_use]
    pub const fn token(&self) -> Option<&ActivationToken> {
        match self {
            Self::Pending(token) => Some(token),
            Self::Consumed => None,
        }
    }
}

impl fmt::Display for ActivationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActivationKey {
    type Error = ParseActivationKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value == Self::CONSUMED_SENTINEL {
            return Ok(Self::Consumed);
        }
        ActivationToken::parse(value)
            .map(Self::Pending)
            .map_err(|_| ParseActivationKeyError(value.to_owned()))
    }
}

const fn is_lower_hex(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, 'a'..='f')
}

fn to_lower_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|byte| {
            [
                char::from_digit(u32::from(byte >> 4), 16),
                char::from_digit(u32::from(byte & 0x0f), 16),
            ]
        })
        .flatten()
        .collect()
}
