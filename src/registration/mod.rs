//! User registration lifecycle for vestibule.
//!
//! Implements self-service and supervised account registration: token
//! issuance, activation, optional administrator approval, activation-mail
//! resending, and expiry sweeping. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
