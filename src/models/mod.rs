//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod date;

// Re-export commonly used types
pub use author::{Author, AuthorForm, NewAuthor};
pub use book::{Book, BookForm, BookView, NewBook, SortBy};
pub use date::parse_calendar_date;

use crate::error::{AppError, AppResult};

/// Unwrap a required form field, rejecting absent or blank values.
/// Returns the trimmed value.
pub(crate) fn required_field(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

/// Optional form fields arrive as empty strings when left blank
pub(crate) fn optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
