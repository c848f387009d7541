//! In-memory news catalogue for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::news::{
    domain::{Article, ArticleId, Column, ColumnId, Slug},
    ports::{
        ArticleRepository, ColumnRepository, NewsRepositoryError, NewsRepositoryResult,
    },
};

/// Thread-safe in-memory column and article store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNewsCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    columns: HashMap<ColumnId, Column>,
    articles: HashMap<ArticleId, Article>,
}

impl InMemoryNewsCatalog {
    /// Creates an empty in-memory catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ColumnRepository for InMemoryNewsCatalog {
    async fn store(&self, column: &Column) -> NewsRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NewsRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn update(&self, column: &Column) -> NewsRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NewsRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.columns.contains_key(&column.id()) {
            return Err(NewsRepositoryError::ColumnNotFound(column.id()));
        }
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> NewsRepositoryResult<Option<Column>> {
        let state = self.state.read().map_err(|err| {
            NewsRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matching: Vec<&Column> = state
            .columns
            .values()
            .filter(|column| column.slug() == slug)
            .collect();
        matching.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(matching.first().map(|column| (*column).clone()))
    }

    async fn list(&self) -> NewsRepositoryResult<Vec<Column>> {
        let state = self.state.read().map_err(|err| {
            NewsRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut columns: Vec<Column> = state.columns.values().cloned().collect();
        columns.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(columns)
    }
}

#[async_trait]
impl ArticleRepository for InMemoryNewsCatalog {
    async fn store(&self, article: &Article) -> NewsRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NewsRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.articles.insert(article.id(), article.clone());
        Ok(())
    }

    async fn update(&self, article: &Article) -> NewsRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NewsRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.articles.contains_key(&article.id()) {
            return Err(NewsRepositoryError::ArticleNotFound(article.id()));
        }
        state.articles.insert(article.id(), article.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> NewsRepositoryResult<Option<Article>> {
        let state = self.state.read().map_err(|err| {
            NewsRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matching: Vec<&Article> = state
            .articles
            .values()
            .filter(|article| article.slug() == slug)
            .collect();
        matching.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(matching.first().map(|article| (*article).clone()))
    }

    async fn list(&self) -> NewsRepositoryResult<Vec<Article>> {
        let state = self.state.read().map_err(|err| {
            NewsRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut articles: Vec<Article> = state.articles.values().cloned().collect();
        articles.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(articles)
    }

    async fn list_published(&self) -> NewsRepositoryResult<Vec<Article>> {
        let state = self.state.read().map_err(|err| {
            NewsRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut articles: Vec<Article> = state
            .articles
            .values()
            .filter(|article| article.is_published())
            .cloned()
            .collect();
        articles.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(articles)
    }
}
