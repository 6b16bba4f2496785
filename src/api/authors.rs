//! Author endpoints

use axum::{extract::State, response::Redirect, Form, Json};

use crate::{
    error::AppResult,
    models::author::{Author, AuthorForm},
};

use super::redirect_to_books;

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.catalog.list_authors().await?;
    Ok(Json(authors))
}

/// Add an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Author added, redirect to the listing"),
        (status = 400, description = "Missing name or malformed date", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Redirect> {
    let author = state.services.catalog.add_author(form).await?;
    let message = format!("Author {} added successfully.", author.name);
    Ok(redirect_to_books(Some(&message)))
}
