//! API handlers for the catalog endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Prefix every endpoint is nested under
pub const API_PREFIX: &str = "/api/v1";

/// Default view that mutations redirect back to
pub fn books_location() -> String {
    format!("{}/books", API_PREFIX)
}

/// 303 back to the book listing, optionally carrying a message for display
pub fn redirect_to_books(message: Option<&str>) -> Redirect {
    match message {
        Some(message) => Redirect::to(&format!(
            "{}?success_message={}",
            books_location(),
            urlencoding::encode(message)
        )),
        None => Redirect::to(&books_location()),
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authors
        .route("/authors", get(authors::list_authors).post(authors::create_author))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/new", get(books::new_book_form))
        .route("/books/sort", get(books::sort_books))
        .route("/books/search", get(books::search_books))
        .route("/books/:id", get(books::get_book).delete(books::delete_book))
        .route("/books/:id/delete", post(books::delete_book))
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
