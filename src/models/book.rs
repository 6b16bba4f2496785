//! Book model, display projection and sort order

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::required_field;
use crate::error::{AppError, AppResult};

/// Label shown when a book's author row cannot be resolved
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    /// Not unique: several copies may share an ISBN
    pub isbn: String,
    pub title: String,
    pub publication_year: i32,
    pub author_id: i64,
}

/// Raw add-book form, every field an untrusted string
#[derive(Debug, Default, Clone, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[validate(length(max = 500, message = "title must be at most 500 characters"))]
    pub title: Option<String>,
    /// Selected author ID
    #[serde(alias = "author_id")]
    pub author: Option<String>,
    pub publication_year: Option<String>,
    #[validate(length(max = 32, message = "isbn must be at most 32 characters"))]
    pub isbn: Option<String>,
}

/// Validated book ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author_id: i64,
    pub publication_year: i32,
    pub isbn: String,
}

fn parse_integer<T: std::str::FromStr>(value: &str, field: &str) -> AppResult<T> {
    value
        .parse::<T>()
        .map_err(|_| AppError::Validation(format!("{} must be an integer, got '{}'", field, value)))
}

impl TryFrom<BookForm> for NewBook {
    type Error = AppError;

    fn try_from(form: BookForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let title = required_field(form.title, "title")?;
        let author_id = parse_integer(&required_field(form.author, "author")?, "author")?;
        let publication_year = parse_integer(
            &required_field(form.publication_year, "publication_year")?,
            "publication_year",
        )?;
        let isbn = required_field(form.isbn, "isbn")?;

        Ok(Self {
            title,
            author_id,
            publication_year,
            isbn,
        })
    }
}

/// Book joined with its author's name, for display only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookView {
    pub id: i64,
    pub title: String,
    /// Author name, or "Unknown Author" when unresolved
    pub author: String,
    pub isbn: String,
    pub publication_year: i32,
}

impl BookView {
    pub fn new(book: Book, author_names: &HashMap<i64, String>) -> Self {
        let author = author_names
            .get(&book.author_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        Self {
            id: book.id,
            title: book.title,
            author,
            isbn: book.isbn,
            publication_year: book.publication_year,
        }
    }
}

/// Book listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Ascending title, binary collation
    Title,
    /// Ascending author ID. Note this is the internal identifier, not the name.
    AuthorId,
    /// Primary key order
    #[default]
    Natural,
}

impl SortBy {
    /// Map the `sort_by` query value; anything unrecognised falls back to natural order.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("title") => SortBy::Title,
            Some("author") => SortBy::AuthorId,
            _ => SortBy::Natural,
        }
    }

    pub(crate) fn order_clause(self) -> &'static str {
        match self {
            SortBy::Title => "ORDER BY title, id",
            SortBy::AuthorId => "ORDER BY author_id, id",
            SortBy::Natural => "ORDER BY id",
        }
    }
}
