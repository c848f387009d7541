//! Column (section) entity.

use super::{ColumnId, NewsDomainError, Slug};
use serde::{Deserialize, Serialize};

/// A named section that articles are grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    name: String,
    slug: Slug,
    intro: String,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Persisted display name.
    pub name: String,
    /// Persisted slug.
    pub slug: Slug,
    /// Persisted introduction text.
    pub intro: String,
}

impl Column {
    /// Creates a new column with an empty introduction.
    ///
    /// # Errors
    ///
    /// Returns [`NewsDomainError::EmptyColumnName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>, slug: Slug) -> Result<Self, NewsDomainError> {
        let raw_name = name.into();
        let trimmed_name = raw_name.trim().to_owned();
        if trimmed_name.is_empty() {
            return Err(NewsDomainError::EmptyColumnName);
        }
        Ok(Self {
            id: ColumnId::new(),
            name: trimmed_name,
            slug,
            intro: String::new(),
        })
    }

    /// Sets the introduction text.
    #[must_use]
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = intro.into();
        self
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            slug: data.slug,
            intro: data.intro,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slug.
    #[must_use]
    pub const fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Returns the introduction text.
    #[must_use]
    pub fn intro(&self) -> &str {
        &self.intro
    }
}
