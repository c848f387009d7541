//! Unit tests for the registration module.

mod domain_tests;
mod service_tests;
mod support;
