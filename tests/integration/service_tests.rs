//! Catalog service tests

use chrono::NaiveDate;
use library_catalog::{
    models::{book::UNKNOWN_AUTHOR, AuthorForm, SortBy},
    services::catalog::{DeleteOutcome, SearchOutcome, BOOK_DELETED_MESSAGE, BOOK_NOT_FOUND_MESSAGE},
    AppError,
};

use crate::common::{self, author_form, book_form};

#[tokio::test]
async fn test_add_author_then_list() {
    let (catalog, _) = common::service().await;

    let author = catalog
        .add_author(author_form("Ursula K. Le Guin", "1929-10-21", "2018-01-22"))
        .await
        .unwrap();
    assert_eq!(author.name, "Ursula K. Le Guin");

    let authors = catalog.list_authors().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "Ursula K. Le Guin");
    assert_eq!(authors[0].birth_date, NaiveDate::from_ymd_opt(1929, 10, 21).unwrap());
    assert_eq!(authors[0].date_of_death, NaiveDate::from_ymd_opt(2018, 1, 22));
}

#[tokio::test]
async fn test_add_author_rejects_bad_date_without_writing() {
    let (catalog, repo) = common::service().await;

    let err = catalog
        .add_author(author_form("Someone", "1929/10/21", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = catalog.add_author(AuthorForm::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(repo.authors.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_book_with_unknown_author_never_creates_row() {
    let (catalog, repo) = common::service().await;

    for author_id in [0, 1, 7, -3] {
        let err = catalog
            .add_book(book_form("Orphan", author_id, 2001, "123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Referential(_)), "author_id {author_id}: {err}");
    }
    assert_eq!(repo.books.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_book_and_list_with_author_names() {
    let (catalog, _) = common::service().await;
    let author = catalog
        .add_author(author_form("Octavia Butler", "1947-06-22", "2006-02-24"))
        .await
        .unwrap();

    let book = catalog
        .add_book(book_form("Kindred", author.id, 1979, "978-0807083697"))
        .await
        .unwrap();
    assert_eq!(book.title, "Kindred");

    let books = catalog.list_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, book.id);
    assert_eq!(books[0].author, "Octavia Butler");
    assert_eq!(books[0].isbn, "978-0807083697");
    assert_eq!(books[0].publication_year, 1979);
    assert_ne!(books[0].author, UNKNOWN_AUTHOR);
}

#[tokio::test]
async fn test_list_is_idempotent() {
    let (catalog, _) = common::service().await;
    let author = catalog
        .add_author(author_form("Someone", "1950-01-01", ""))
        .await
        .unwrap();
    catalog.add_book(book_form("A", author.id, 2000, "1")).await.unwrap();
    catalog.add_book(book_form("B", author.id, 2001, "2")).await.unwrap();

    let first = catalog.list_books().await.unwrap();
    let second = catalog.list_books().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_sort_by_title_and_author_id() {
    let (catalog, _) = common::service().await;
    // Names chosen so that name order and ID order disagree
    let zed = catalog.add_author(author_form("Zed", "1950-01-01", "")).await.unwrap();
    let amy = catalog.add_author(author_form("Amy", "1960-01-01", "")).await.unwrap();

    catalog.add_book(book_form("Zebra", amy.id, 2000, "1")).await.unwrap();
    catalog.add_book(book_form("Apple", zed.id, 2001, "2")).await.unwrap();
    catalog.add_book(book_form("Mango", amy.id, 2002, "3")).await.unwrap();

    let titles = |books: Vec<library_catalog::models::BookView>| {
        books.into_iter().map(|b| b.title).collect::<Vec<_>>()
    };

    let by_title = catalog.sort_books(SortBy::from_param(Some("title"))).await.unwrap();
    assert_eq!(titles(by_title), ["Apple", "Mango", "Zebra"]);

    // Author ID order: Zed (created first) before Amy
    let by_author = catalog.sort_books(SortBy::from_param(Some("author"))).await.unwrap();
    let authors: Vec<_> = by_author.iter().map(|b| b.author.clone()).collect();
    assert_eq!(authors, ["Zed", "Amy", "Amy"]);
    assert_eq!(titles(by_author), ["Apple", "Zebra", "Mango"]);

    let default = catalog.sort_books(SortBy::from_param(None)).await.unwrap();
    assert_eq!(default, catalog.list_books().await.unwrap());
}

#[tokio::test]
async fn test_search_distinguishes_absent_empty_and_no_match() {
    let (catalog, _) = common::service().await;
    let author = catalog
        .add_author(author_form("Someone", "1950-01-01", ""))
        .await
        .unwrap();
    catalog.add_book(book_form("Foundation", author.id, 1951, "1")).await.unwrap();
    catalog.add_book(book_form("I, Robot", author.id, 1950, "2")).await.unwrap();

    assert_eq!(catalog.search_books(None).await.unwrap(), SearchOutcome::NoTerm);

    assert_eq!(
        catalog.search_books(Some("")).await.unwrap(),
        SearchOutcome::NoResults { term: String::new() }
    );

    assert_eq!(
        catalog.search_books(Some("Neuromancer")).await.unwrap(),
        SearchOutcome::NoResults {
            term: "Neuromancer".to_string()
        }
    );

    match catalog.search_books(Some("found")).await.unwrap() {
        SearchOutcome::Matches { term, books } => {
            assert_eq!(term, "found");
            assert_eq!(books.len(), 1);
            assert_eq!(books[0].title, "Foundation");
            assert_eq!(books[0].author, "Someone");
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_missing_book_changes_nothing() {
    let (catalog, repo) = common::service().await;
    let author = catalog
        .add_author(author_form("Someone", "1950-01-01", ""))
        .await
        .unwrap();
    catalog.add_book(book_form("Stays", author.id, 2000, "1")).await.unwrap();

    let authors_before = repo.authors.list().await.unwrap();
    let books_before = repo.books.list().await.unwrap();

    let outcome = catalog.delete_book(999).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::NotFound);
    assert_eq!(outcome.message(), BOOK_NOT_FOUND_MESSAGE);

    assert_eq!(repo.authors.list().await.unwrap(), authors_before);
    assert_eq!(repo.books.list().await.unwrap(), books_before);
}

#[tokio::test]
async fn test_delete_last_book_removes_author() {
    let (catalog, repo) = common::service().await;
    let author = catalog
        .add_author(author_form("One Hit", "1950-01-01", ""))
        .await
        .unwrap();
    let book = catalog.add_book(book_form("Only", author.id, 2000, "1")).await.unwrap();

    let outcome = catalog.delete_book(book.id).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted { author_removed: true });
    assert_eq!(outcome.message(), BOOK_DELETED_MESSAGE);

    assert_eq!(repo.books.get_by_id(book.id).await.unwrap(), None);
    assert_eq!(repo.authors.get_by_id(author.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_keeps_author_with_remaining_books() {
    let (catalog, repo) = common::service().await;
    let author = catalog
        .add_author(author_form("Prolific", "1950-01-01", ""))
        .await
        .unwrap();
    let first = catalog.add_book(book_form("First", author.id, 2000, "1")).await.unwrap();
    catalog.add_book(book_form("Second", author.id, 2001, "2")).await.unwrap();

    let before = repo.books.count_by_author(author.id).await.unwrap();
    let outcome = catalog.delete_book(first.id).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted { author_removed: false });

    assert!(repo.authors.get_by_id(author.id).await.unwrap().is_some());
    assert_eq!(repo.books.count_by_author(author.id).await.unwrap(), before - 1);
}

#[tokio::test]
async fn test_get_book_not_found() {
    let (catalog, _) = common::service().await;
    let err = catalog.get_book(5).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_dangling_author_reference_shows_unknown_author() {
    let (catalog, repo) = common::service().await;

    // Only reachable with enforcement switched off on the single in-memory connection
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(&repo.pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO book (isbn, title, publication_year, author_id) VALUES ('x', 'Stray', 2000, 77)",
    )
    .execute(&repo.pool)
    .await
    .unwrap();

    let books = catalog.list_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].author, UNKNOWN_AUTHOR);
}
