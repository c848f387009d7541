//! Vestibule: user registration and news content for small sites.
//!
//! This crate provides a self-service and supervised user-registration
//! lifecycle (activation keys, administrator approval, expiry sweeping)
//! together with a small slug-addressed news catalogue.
//!
//! # Architecture
//!
//! Vestibule follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, notifiers)
//!
//! # Modules
//!
//! - [`registration`]: account registration, activation, approval, sweeping
//! - [`news`]: columns, articles, and plain-text views

pub mod news;
pub mod registration;
