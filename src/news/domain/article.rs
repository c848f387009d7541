//! Article entity.

use super::{ArticleId, ColumnId, NewsDomainError, Slug};
use crate::registration::domain::UserId;
use serde::{Deserialize, Serialize};

/// A piece of content published under zero or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    id: ArticleId,
    title: String,
    slug: Slug,
    content: String,
    published: bool,
    author: Option<UserId>,
    column_ids: Vec<ColumnId>,
}

/// Parameter object for reconstructing a persisted article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedArticleData {
    /// Persisted article identifier.
    pub id: ArticleId,
    /// Persisted title.
    pub title: String,
    /// Persisted slug.
    pub slug: Slug,
    /// Persisted body text.
    pub content: String,
    /// Persisted published flag.
    pub published: bool,
    /// Persisted author reference.
    pub author: Option<UserId>,
    /// Persisted column memberships.
    pub column_ids: Vec<ColumnId>,
}

impl Article {
    /// Creates a new published article with an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`NewsDomainError::EmptyArticleTitle`] when the title is
    /// empty after trimming.
    pub fn new(title: impl Into<String>, slug: Slug) -> Result<Self, NewsDomainError> {
        let raw_title = title.into();
        let trimmed_title = raw_title.trim().to_owned();
        if trimmed_title.is_empty() {
            return Err(NewsDomainError::EmptyArticleTitle);
        }
        Ok(Self {
            id: ArticleId::new(),
            title: trimmed_title,
            slug,
            content: String::new(),
            published: true,
            author: None,
            column_ids: Vec::new(),
        })
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the author reference.
    #[must_use]
    pub const fn with_author(mut self, author: UserId) -> Self {
        self.author = Some(author);
        self
    }

    /// Sets the column memberships.
    #[must_use]
    pub fn with_columns(mut self, column_ids: impl IntoIterator<Item = ColumnId>) -> Self {
        self.column_ids = column_ids.into_iter().collect();
        self
    }

    /// Reconstructs an article from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedArticleData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            slug: data.slug,
            content: data.content,
            published: data.published,
            author: data.author,
            column_ids: data.column_ids,
        }
    }

    /// Returns the article identifier.
    #[must_use]
    pub const fn id(&self) -> ArticleId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the slug.
    #[must_use]
    pub const fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Returns the body text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns true when the article is visible in published listings.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.published
    }

    /// Returns the author reference, when one is set.
    #[must_use]
    pub const fn author(&self) -> Option<UserId> {
        self.author
    }

    /// Returns the column memberships.
    #[must_use]
    pub fn column_ids(&self) -> &[ColumnId] {
        &self.column_ids
    }

    /// Marks the article published.
    pub fn publish(&mut self) {
        self.published = true;
    }

    /// Withdraws the article from published listings.
    pub fn unpublish(&mut self) {
        self.published = false;
    }
}
