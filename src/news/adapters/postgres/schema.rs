//! Diesel schema for news catalogue persistence.

diesel::table! {
    /// Column (section) records.
    columns (id) {
        /// Internal column identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 256]
        name -> Varchar,
        /// URL slug, indexed, unique by convention.
        #[max_length = 256]
        slug -> Varchar,
        /// Introduction text.
        intro -> Text,
    }
}

diesel::table! {
    /// Article records.
    articles (id) {
        /// Internal article identifier.
        id -> Uuid,
        /// Title.
        #[max_length = 256]
        title -> Varchar,
        /// URL slug, indexed, unique by convention.
        #[max_length = 256]
        slug -> Varchar,
        /// Body text.
        content -> Text,
        /// Whether the article appears in published listings.
        published -> Bool,
        /// Optional author account reference.
        author_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Article-to-column membership rows.
    article_columns (article_id, column_id) {
        /// Member article identifier.
        article_id -> Uuid,
        /// Containing column identifier.
        column_id -> Uuid,
    }
}

diesel::joinable!(article_columns -> articles (article_id));
diesel::joinable!(article_columns -> columns (column_id));
diesel::allow_tables_to_appear_in_same_query!(articles, article_columns, columns);
