//! Port contracts for the news catalogue.

pub mod repository;

pub use repository::{
    ArticleRepository, ColumnRepository, NewsRepositoryError, NewsRepositoryResult,
};
