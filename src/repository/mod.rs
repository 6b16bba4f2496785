//! Repository layer for database operations

pub mod authors;
pub mod books;

use std::{path::Path, str::FromStr, time::Duration};

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    Pool, Sqlite,
};

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::book::Book,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Outcome of removing a book together with its possibly orphaned author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeDelete {
    pub book: Book,
    /// True when the book was the author's last one and the author went with it
    pub author_removed: bool,
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open the store described by `config` and create the tables if absent
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = if config.is_in_memory() {
            let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
            // Every connection would get its own empty database, so keep exactly one alive.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(opts)
                .await?
        } else {
            let path = Path::new(&config.path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Internal(format!("Cannot create {}: {}", parent.display(), e))
                })?;
            }

            let opts = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .foreign_keys(true)
                .busy_timeout(Duration::from_secs(5));

            SqlitePoolOptions::new()
                .max_connections(config.max_connections.max(1))
                .connect_with(opts)
                .await?
        };

        MIGRATOR.run(&pool).await?;
        tracing::debug!(path = %config.path, "Catalog store ready");

        Ok(Self::new(pool))
    }

    /// Check the store answers queries
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Delete a book and, if it was the author's last book, the author too.
    ///
    /// Both deletes and the count between them run in one transaction.
    /// Returns `None` without touching the store when the book does not exist.
    pub async fn delete_book_cascade(&self, book_id: i64) -> AppResult<Option<CascadeDelete>> {
        let mut tx = self.pool.begin().await?;

        // The DELETE comes first so the transaction holds the write lock from its first statement.
        let Some(book) = books::BooksRepository::take_with(&mut tx, book_id).await? else {
            return Ok(None);
        };

        let remaining = books::BooksRepository::count_by_author_with(&mut tx, book.author_id).await?;
        let author_removed = if remaining == 0 {
            authors::AuthorsRepository::delete_with(&mut tx, book.author_id).await?
        } else {
            false
        };

        tx.commit().await?;

        Ok(Some(CascadeDelete {
            book,
            author_removed,
        }))
    }
}
