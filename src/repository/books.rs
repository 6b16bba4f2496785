//! Books repository

use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook, SortBy},
};

const BOOK_COLUMNS: &str = "id, isbn, title, publication_year, author_id";

/// Build a LIKE pattern matching `term` literally anywhere in the value.
/// `\` is the escape character declared in the query.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all books in primary key order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.list_sorted_by(SortBy::Natural).await
    }

    /// List all books in the requested order
    pub async fn list_sorted_by(&self, sort_by: SortBy) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM book {}", BOOK_COLUMNS, sort_by.order_clause());
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Books whose title contains `term`, ignoring ASCII case.
    /// An empty term matches nothing.
    pub async fn find_by_title_substring(&self, term: &str) -> AppResult<Vec<Book>> {
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            r"SELECT {} FROM book WHERE title LIKE ? ESCAPE '\' ORDER BY id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(contains_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM book WHERE id = ?", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Number of books referencing an author
    pub async fn count_by_author(&self, author_id: i64) -> AppResult<i64> {
        let mut conn = self.pool.acquire().await?;
        Self::count_by_author_with(&mut conn, author_id).await
    }

    pub(crate) async fn count_by_author_with(
        conn: &mut SqliteConnection,
        author_id: i64,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book WHERE author_id = ?")
            .bind(author_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Create a book. The author check and the insert are a single statement,
    /// so no book row can appear for a missing author.
    pub async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO book (isbn, title, publication_year, author_id)
            SELECT ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM author WHERE id = ?)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&data.isbn)
            .bind(&data.title)
            .bind(data.publication_year)
            .bind(data.author_id)
            .bind(data.author_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::Referential(format!("Author {} does not exist", data.author_id))
            })
    }

    /// Delete book, returning whether a row was removed
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(Self::take_with(&mut conn, id).await?.is_some())
    }

    /// Delete a book and hand back the removed row
    pub(crate) async fn take_with(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Book>> {
        let query = format!("DELETE FROM book WHERE id = ? RETURNING {}", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
