//! Shared fixtures

use library_catalog::{
    config::{AppConfig, DatabaseConfig},
    models::{AuthorForm, BookForm},
    repository::Repository,
    services::catalog::CatalogService,
    AppState,
};

/// Fresh, empty in-memory store
pub async fn repository() -> Repository {
    Repository::connect(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory store")
}

pub async fn service() -> (CatalogService, Repository) {
    let repository = repository().await;
    (CatalogService::new(repository.clone()), repository)
}

pub async fn state() -> (AppState, Repository) {
    let repository = repository().await;
    let config = AppConfig {
        database: DatabaseConfig::in_memory(),
        ..Default::default()
    };
    (AppState::new(config, repository.clone()), repository)
}

pub fn author_form(name: &str, birthdate: &str, date_of_death: &str) -> AuthorForm {
    AuthorForm {
        name: Some(name.to_string()),
        birthdate: Some(birthdate.to_string()),
        date_of_death: Some(date_of_death.to_string()),
    }
}

pub fn book_form(title: &str, author_id: i64, year: i32, isbn: &str) -> BookForm {
    BookForm {
        title: Some(title.to_string()),
        author: Some(author_id.to_string()),
        publication_year: Some(year.to_string()),
        isbn: Some(isbn.to_string()),
    }
}
