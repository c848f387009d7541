//! Diesel row models for news catalogue persistence.

use super::schema::{article_columns, articles, columns};
use diesel::prelude::*;

/// Query result row for column records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Internal column identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Display name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// URL slug.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub slug: String,
    /// Introduction text.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub intro: String,
}

/// Insert model for column records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = columns)]
pub struct NewColumnRow {
    /// Internal column identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Introduction text.
    pub intro: String,
}

/// Query result row for article records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ArticleRow {
    /// Internal article identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// URL slug.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub slug: String,
    /// Body text.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub content: String,
    /// Whether the article appears in published listings.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub published: bool,
    /// Optional author account reference.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub author_id: Option<uuid::Uuid>,
}

/// Insert model for article records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub struct NewArticleRow {
    /// Internal article identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Body text.
    pub content: String,
    /// Whether the article appears in published listings.
    pub published: bool,
    /// Optional author account reference.
    pub author_id: Option<uuid::Uuid>,
}

/// Row model for article-to-column membership.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = article_columns)]
pub struct ArticleColumnRow {
    /// Member article identifier.
    pub article_id: uuid::Uuid,
    /// Containing column identifier.
    pub column_id: uuid::Uuid,
}
