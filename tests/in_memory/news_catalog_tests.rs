//! News catalogue integration tests over the in-memory adapter.

use rstest::rstest;

use vestibule::news::{
    adapters::memory::InMemoryNewsCatalog,
    domain::{Article, Column, Slug},
    ports::{ArticleRepository, ColumnRepository},
    services::views,
};

fn slug(value: &str) -> Slug {
    Slug::new(value).expect("valid slug")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn catalogue_round_trips_columns_and_articles() {
    let catalog = InMemoryNewsCatalog::new();

    let python = Column::new("Python", slug("python"))
        .expect("valid column")
        .with_intro("Learn Python from scratch");
    ColumnRepository::store(&catalog, &python)
        .await
        .expect("store should succeed");

    let lesson = Article::new("Getting started", slug("getting-started"))
        .expect("valid article")
        .with_content("Install the interpreter first.")
        .with_columns([python.id()]);
    ArticleRepository::store(&catalog, &lesson)
        .await
        .expect("store should succeed");

    let found_column = ColumnRepository::find_by_slug(&catalog, &slug("python"))
        .await
        .expect("lookup should succeed")
        .expect("column should exist");
    assert_eq!(found_column.intro(), "Learn Python from scratch");

    let found_article = ArticleRepository::find_by_slug(&catalog, &slug("getting-started"))
        .await
        .expect("lookup should succeed")
        .expect("article should exist");
    assert_eq!(found_article.column_ids(), [python.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unpublished_articles_stay_out_of_the_published_listing() {
    let catalog = InMemoryNewsCatalog::new();

    let mut draft = Article::new("Draft lesson", slug("draft-lesson")).expect("valid article");
    draft.unpublish();
    ArticleRepository::store(&catalog, &draft)
        .await
        .expect("store should succeed");

    let published = catalog
        .list_published()
        .await
        .expect("listing should succeed");
    assert!(published.is_empty());
}

#[rstest]
fn views_render_the_documented_text() {
    assert_eq!(views::index(), "Welcome to the vestibule news desk");
    assert_eq!(views::column_detail("python"), "column slug: python");
    assert_eq!(
        views::article_detail("getting-started"),
        "article slug: getting-started"
    );
}
