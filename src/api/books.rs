//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        author::Author,
        book::{Book, BookForm, BookView, SortBy},
    },
    services::catalog::SearchOutcome,
};

use super::redirect_to_books;

/// Book listing as shown on the home view
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct BooksPage {
    pub books: Vec<BookView>,
    /// Confirmation or error message from a previous mutation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    /// Term the listing was filtered by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    /// True when a search ran and matched nothing
    pub no_results: bool,
}

/// Data needed to fill in the add-book form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewBookForm {
    /// Authors a new book may reference
    pub authors: Vec<Author>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HomeQuery {
    /// Message to echo back, set by redirects
    pub success_message: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// `title` or `author`; anything else keeps natural order
    pub sort_by: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring to look for in titles, ASCII case-insensitive
    pub search_term: Option<String>,
}

/// List every book with its author's name
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(HomeQuery),
    responses(
        (status = 200, description = "All books", body = BooksPage)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<HomeQuery>,
) -> AppResult<Json<BooksPage>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(BooksPage {
        books,
        success_message: query.success_message,
        ..Default::default()
    }))
}

/// Authors to choose from before adding a book
#[utoipa::path(
    get,
    path = "/books/new",
    tag = "books",
    responses(
        (status = 200, description = "Known authors", body = NewBookForm)
    )
)]
pub async fn new_book_form(State(state): State<crate::AppState>) -> AppResult<Json<NewBookForm>> {
    let authors = state.services.catalog.list_authors().await?;
    Ok(Json(NewBookForm { authors }))
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book added, redirect to the listing"),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 422, description = "Author does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Redirect> {
    let book = state.services.catalog.add_book(form).await?;
    let message = format!("Book \"{}\" added successfully.", book.title);
    Ok(redirect_to_books(Some(&message)))
}

/// List books sorted by title or by author ID
#[utoipa::path(
    get,
    path = "/books/sort",
    tag = "books",
    params(SortQuery),
    responses(
        (status = 200, description = "Sorted books", body = BooksPage)
    )
)]
pub async fn sort_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SortQuery>,
) -> AppResult<Json<BooksPage>> {
    let sort_by = SortBy::from_param(query.sort_by.as_deref());
    let books = state.services.catalog.sort_books(sort_by).await?;
    Ok(Json(BooksPage {
        books,
        ..Default::default()
    }))
}

/// Search book titles
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books, or an empty list with no_results set", body = BooksPage),
        (status = 303, description = "No term given, redirect to the listing")
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let page = match state
        .services
        .catalog
        .search_books(query.search_term.as_deref())
        .await?
    {
        SearchOutcome::NoTerm => return Ok(redirect_to_books(None).into_response()),
        SearchOutcome::Matches { term, books } => BooksPage {
            books,
            search_term: Some(term),
            ..Default::default()
        },
        SearchOutcome::NoResults { term } => BooksPage {
            search_term: Some(term),
            no_results: true,
            ..Default::default()
        },
    };
    Ok(Json(page).into_response())
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Delete a book, and its author when this was the author's last book.
///
/// A missing book is reported through the redirect message, not as an error.
#[utoipa::path(
    post,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Redirect to the listing with the outcome message")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    let outcome = state.services.catalog.delete_book(id).await?;
    Ok(redirect_to_books(Some(outcome.message())))
}
