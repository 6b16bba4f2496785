//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorForm, NewAuthor},
        book::{Book, BookForm, BookView, NewBook, SortBy},
    },
    repository::Repository,
};

pub const BOOK_DELETED_MESSAGE: &str = "Book deleted successfully.";
pub const BOOK_NOT_FOUND_MESSAGE: &str = "Error: Book not found.";

/// Result of a title search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No term was given; the caller should fall back to the full listing
    NoTerm,
    Matches { term: String, books: Vec<BookView> },
    /// A term was given and nothing matched
    NoResults { term: String },
}

/// Result of a book deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { author_removed: bool },
    NotFound,
}

impl DeleteOutcome {
    /// User-facing message for the outcome
    pub fn message(&self) -> &'static str {
        match self {
            DeleteOutcome::Deleted { .. } => BOOK_DELETED_MESSAGE,
            DeleteOutcome::NotFound => BOOK_NOT_FOUND_MESSAGE,
        }
    }
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check the store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// All known authors, in creation order
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Validate and store a new author
    pub async fn add_author(&self, form: AuthorForm) -> AppResult<Author> {
        let data = NewAuthor::try_from(form)?;
        let author = self.repository.authors.create(&data).await?;
        tracing::info!("Catalog: added author id={} name={:?}", author.id, author.name);
        Ok(author)
    }

    /// Validate and store a new book for an existing author
    pub async fn add_book(&self, form: BookForm) -> AppResult<Book> {
        let data = NewBook::try_from(form)?;
        let book = self.repository.books.create(&data).await?;
        tracing::info!(
            "Catalog: added book id={} title={:?} author_id={}",
            book.id,
            book.title,
            book.author_id
        );
        Ok(book)
    }

    /// Get a single book
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Every book with its author's name
    pub async fn list_books(&self) -> AppResult<Vec<BookView>> {
        self.sort_books(SortBy::Natural).await
    }

    /// Every book with its author's name, in the requested order.
    ///
    /// `SortBy::AuthorId` orders by the author's ID, not the name.
    pub async fn sort_books(&self, sort_by: SortBy) -> AppResult<Vec<BookView>> {
        let books = self.repository.books.list_sorted_by(sort_by).await?;
        self.project(books).await
    }

    /// Search titles for `term`.
    ///
    /// An absent term asks for the default listing. A present term, even an
    /// empty one, is searched and reports `NoResults` when nothing matches.
    pub async fn search_books(&self, term: Option<&str>) -> AppResult<SearchOutcome> {
        let Some(term) = term else {
            return Ok(SearchOutcome::NoTerm);
        };

        let books = self.repository.books.find_by_title_substring(term).await?;
        if books.is_empty() {
            return Ok(SearchOutcome::NoResults {
                term: term.to_string(),
            });
        }

        Ok(SearchOutcome::Matches {
            term: term.to_string(),
            books: self.project(books).await?,
        })
    }

    /// Delete a book, removing its author too when no other book references it
    pub async fn delete_book(&self, id: i64) -> AppResult<DeleteOutcome> {
        match self.repository.delete_book_cascade(id).await? {
            Some(deleted) => {
                tracing::info!(
                    "Catalog: deleted book id={} title={:?}",
                    deleted.book.id,
                    deleted.book.title
                );
                if deleted.author_removed {
                    tracing::info!(
                        "Catalog: removed author id={} with no remaining books",
                        deleted.book.author_id
                    );
                }
                Ok(DeleteOutcome::Deleted {
                    author_removed: deleted.author_removed,
                })
            }
            None => {
                tracing::warn!("Catalog: delete requested for unknown book id={}", id);
                Ok(DeleteOutcome::NotFound)
            }
        }
    }

    /// Join books with author names
    async fn project(&self, books: Vec<Book>) -> AppResult<Vec<BookView>> {
        let names = self.repository.authors.names().await?;
        Ok(books
            .into_iter()
            .map(|book| BookView::new(book, &names))
            .collect())
    }
}
