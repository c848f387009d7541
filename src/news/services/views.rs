//! Plain-text view handlers for the news catalogue.
//!
//! GET-only, unauthenticated, read-only. The handlers return static or
//! slug-interpolated text and deliberately consult no storage.

/// Returns the landing greeting.
#[must_use]
pub const fn index() -> &'static str {
    "Welcome to the vestibule news desk"
}

/// Returns the column detail text for a slug.
#[must_use]
pub fn column_detail(column_slug: &str) -> String {
    format!("column slug: {column_slug}")
}

/// Returns the article detail text for a slug.
#[must_use]
pub fn article_detail(article_slug: &str) -> String {
    format!("article slug: {article_slug}")
}
