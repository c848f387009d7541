//! News catalogue for vestibule.
//!
//! Columns group articles; both are slug-addressed CRUD entities with a
//! published flag and no further lifecycle. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - View services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
