//! Repository ports for news catalogue persistence.

use crate::news::domain::{Article, ArticleId, Column, ColumnId, Slug};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for news repository operations.
pub type NewsRepositoryResult<T> = Result<T, NewsRepositoryError>;

/// Column persistence contract.
#[async_trait]
pub trait ColumnRepository: Send + Sync {
    /// Stores a new column.
    async fn store(&self, column: &Column) -> NewsRepositoryResult<()>;

    /// Persists changes to an existing column.
    ///
    /// # Errors
    ///
    /// Returns [`NewsRepositoryError::ColumnNotFound`] when the column
    /// does not exist.
    async fn update(&self, column: &Column) -> NewsRepositoryResult<()>;

    /// Finds the first column with the given slug, in name order.
    ///
    /// Returns `None` when no column has the slug. Slug uniqueness is by
    /// convention only, so ties resolve to the first match.
    async fn find_by_slug(&self, slug: &Slug) -> NewsRepositoryResult<Option<Column>>;

    /// Returns every column, ordered by name.
    async fn list(&self) -> NewsRepositoryResult<Vec<Column>>;
}

/// Article persistence contract.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Stores a new article with its column memberships.
    async fn store(&self, article: &Article) -> NewsRepositoryResult<()>;

    /// Persists changes to an existing article, replacing its column
    /// memberships.
    ///
    /// # Errors
    ///
    /// Returns [`NewsRepositoryError::ArticleNotFound`] when the article
    /// does not exist.
    async fn update(&self, article: &Article) -> NewsRepositoryResult<()>;

    /// Finds the first article with the given slug, in title order.
    ///
    /// Returns `None` when no article has the slug.
    async fn find_by_slug(&self, slug: &Slug) -> NewsRepositoryResult<Option<Article>>;

    /// Returns every article, ordered by title.
    async fn list(&self) -> NewsRepositoryResult<Vec<Article>>;

    /// Returns every published article, ordered by title.
    async fn list_published(&self) -> NewsRepositoryResult<Vec<Article>>;
}

/// Errors returned by news repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NewsRepositoryError {
    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The article was not found.
    #[error("article not found: {0}")]
    ArticleNotFound(ArticleId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NewsRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
