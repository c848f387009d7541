//! `PostgreSQL` news catalogue implementation.

use super::{
    models::{ArticleColumnRow, ArticleRow, ColumnRow, NewArticleRow, NewColumnRow},
    schema::{article_columns, articles, columns},
};
use crate::news::{
    domain::{
        Article, ArticleId, Column, ColumnId, PersistedArticleData, PersistedColumnData, Slug,
    },
    ports::{
        ArticleRepository, ColumnRepository, NewsRepositoryError, NewsRepositoryResult,
    },
};
use crate::registration::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by news adapters.
pub type NewsPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed column and article store.
#[derive(Debug, Clone)]
pub struct PostgresNewsCatalog {
    pool: NewsPgPool,
}

impl PostgresNewsCatalog {
    /// Creates a new catalogue from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NewsPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NewsRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NewsRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NewsRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NewsRepositoryError::persistence)?
    }
}

#[async_trait]
impl ColumnRepository for PostgresNewsCatalog {
    async fn store(&self, column: &Column) -> NewsRepositoryResult<()> {
        let new_row = NewColumnRow {
            id: column.id().into_inner(),
            name: column.name().to_owned(),
            slug: column.slug().as_str().to_owned(),
            intro: column.intro().to_owned(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(columns::table)
                .values(&new_row)
                .execute(connection)
                .map_err(NewsRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, column: &Column) -> NewsRepositoryResult<()> {
        let column_id = column.id();
        let name_val = column.name().to_owned();
        let slug_val = column.slug().as_str().to_owned();
        let intro_val = column.intro().to_owned();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(columns::table.filter(columns::id.eq(column_id.into_inner())))
                    .set((
                        columns::name.eq(&name_val),
                        columns::slug.eq(&slug_val),
                        columns::intro.eq(&intro_val),
                    ))
                    .execute(connection)
                    .map_err(NewsRepositoryError::persistence)?;
            if updated_count == 0 {
                return Err(NewsRepositoryError::ColumnNotFound(column_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_slug(&self, slug: &Slug) -> NewsRepositoryResult<Option<Column>> {
        let slug_str = slug.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = columns::table
                .filter(columns::slug.eq(&slug_str))
                .order(columns::name.asc())
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(NewsRepositoryError::persistence)?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn list(&self) -> NewsRepositoryResult<Vec<Column>> {
        self.run_blocking(move |connection| {
            let rows = columns::table
                .order(columns::name.asc())
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(NewsRepositoryError::persistence)?;
            rows.into_iter().map(row_to_column).collect()
        })
        .await
    }
}

#[async_trait]
impl ArticleRepository for PostgresNewsCatalog {
    async fn store(&self, article: &Article) -> NewsRepositoryResult<()> {
        let new_row = to_new_article_row(article);
        let membership_rows = to_membership_rows(article);

        self.run_blocking(move |connection| {
            connection
                .transaction(|inner| {
                    diesel::insert_into(articles::table)
                        .values(&new_row)
                        .execute(inner)?;
                    if !membership_rows.is_empty() {
                        diesel::insert_into(article_columns::table)
                            .values(&membership_rows)
                            .execute(inner)?;
                    }
                    Ok::<_, DieselError>(())
                })
                .map_err(NewsRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, article: &Article) -> NewsRepositoryResult<()> {
        let article_id = article.id();
        let title_val = article.title().to_owned();
        let slug_val = article.slug().as_str().to_owned();
        let content_val = article.content().to_owned();
        let published_val = article.is_published();
        let author_val = article.author().map(UserId::into_inner);
        let membership_rows = to_membership_rows(article);

        self.run_blocking(move |connection| {
            let updated_count = connection
                .transaction(|inner| {
                    let count = diesel::update(
                        articles::table.filter(articles::id.eq(article_id.into_inner())),
                    )
                    .set((
                        articles::title.eq(&title_val),
                        articles::slug.eq(&slug_val),
                        articles::content.eq(&content_val),
                        articles::published.eq(published_val),
                        articles::author_id.eq(author_val),
                    ))
                    .execute(inner)?;
                    if count == 0 {
                        return Ok(0);
                    }

                    diesel::delete(
                        article_columns::table
                            .filter(article_columns::article_id.eq(article_id.into_inner())),
                    )
                    .execute(inner)?;
                    if !membership_rows.is_empty() {
                        diesel::insert_into(article_columns::table)
                            .values(&membership_rows)
                            .execute(inner)?;
                    }
                    Ok::<_, DieselError>(count)
                })
                .map_err(NewsRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(NewsRepositoryError::ArticleNotFound(article_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_slug(&self, slug: &Slug) -> NewsRepositoryResult<Option<Article>> {
        let slug_str = slug.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = articles::table
                .filter(articles::slug.eq(&slug_str))
                .order(articles::title.asc())
                .select(ArticleRow::as_select())
                .first::<ArticleRow>(connection)
                .optional()
                .map_err(NewsRepositoryError::persistence)?;
            row.map(|found| {
                let memberships = load_memberships(connection, found.id)?;
                row_to_article(found, memberships)
            })
            .transpose()
        })
        .await
    }

    async fn list(&self) -> NewsRepositoryResult<Vec<Article>> {
        self.run_blocking(move |connection| {
            let rows = articles::table
                .order(articles::title.asc())
                .select(ArticleRow::as_select())
                .load::<ArticleRow>(connection)
                .map_err(NewsRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| {
                    let memberships = load_memberships(connection, row.id)?;
                    row_to_article(row, memberships)
                })
                .collect()
        })
        .await
    }

    async fn list_published(&self) -> NewsRepositoryResult<Vec<Article>> {
        self.run_blocking(move |connection| {
            let rows = articles::table
                .filter(articles::published.eq(true))
                .order(articles::title.asc())
                .select(ArticleRow::as_select())
                .load::<ArticleRow>(connection)
                .map_err(NewsRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| {
                    let memberships = load_memberships(connection, row.id)?;
                    row_to_article(row, memberships)
                })
                .collect()
        })
        .await
    }
}

fn to_new_article_row(article: &Article) -> NewArticleRow {
    NewArticleRow {
        id: article.id().into_inner(),
        title: article.title().to_owned(),
        slug: article.slug().as_str().to_owned(),
        content: article.content().to_owned(),
        published: article.is_published(),
        author_id: article.author().map(UserId::into_inner),
    }
}

fn to_membership_rows(article: &Article) -> Vec<ArticleColumnRow> {
    article
        .column_ids()
        .iter()
        .map(|column_id| ArticleColumnRow {
            article_id: article.id().into_inner(),
            column_id: column_id.into_inner(),
        })
        .collect()
}

fn load_memberships(
    connection: &mut PgConnection,
    article_id: uuid::Uuid,
) -> NewsRepositoryResult<Vec<ColumnId>> {
    let column_uuids = article_columns::table
        .filter(article_columns::article_id.eq(article_id))
        .select(article_columns::column_id)
        .load::<uuid::Uuid>(connection)
        .map_err(NewsRepositoryError::persistence)?;
    Ok(column_uuids.into_iter().map(ColumnId::from_uuid).collect())
}

fn row_to_column(row: ColumnRow) -> NewsRepositoryResult<Column> {
    let ColumnRow {
        id,
        name,
        slug,
        intro,
    } = row;
    let parsed_slug = Slug::new(&slug).map_err(NewsRepositoryError::invalid_persisted_data)?;
    Ok(Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_uuid(id),
        name,
        slug: parsed_slug,
        intro,
    }))
}

fn row_to_article(row: ArticleRow, column_ids: Vec<ColumnId>) -> NewsRepositoryResult<Article> {
    let ArticleRow {
        id,
        title,
        slug,
        content,
        published,
        author_id,
    } = row;
    let parsed_slug = Slug::new(&slug).map_err(NewsRepositoryError::invalid_persisted_data)?;
    Ok(Article::from_persisted(PersistedArticleData {
        id: ArticleId::from_uuid(id),
        title,
        slug: parsed_slug,
        content,
        published,
        author: author_id.map(UserId::from_uuid),
        column_ids,
    }))
}
