//! Domain model for the news catalogue.
//!
//! Columns group articles; both are plain CRUD entities with slug-based
//! lookup and no lifecycle beyond the published flag.

mod article;
mod column;
mod error;
mod ids;
mod slug;

pub use article::{Article, PersistedArticleData};
pub use column::{Column, PersistedColumnData};
pub use error::NewsDomainError;
pub use ids::{ArticleId, ColumnId};
pub use slug::Slug;
