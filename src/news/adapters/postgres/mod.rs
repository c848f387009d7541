//! `PostgreSQL` adapters for news catalogue persistence.

mod catalog;
mod models;
mod schema;

pub use catalog::{NewsPgPool, PostgresNewsCatalog};
