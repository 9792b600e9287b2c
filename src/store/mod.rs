//! Persistence seam for book records.
//!
//! The service talks to a [`BookStore`] trait object so the SQLite-backed store used in
//! production can be swapped for [`MemoryBookStore`] in tests. Filtering and ordering are
//! the store's job; the service never sorts or filters in memory itself.

mod memory;
mod sqlite;

use async_trait::async_trait;
use sqlx::error::ErrorKind;

use crate::types::{Book, BookFilter, NewBook, SortField, SortOrder};

pub use memory::MemoryBookStore;
pub use sqlite::SqliteBookStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write violated a table constraint.
    #[error("constraint violation: {0}")]
    Constraint(String),
    /// A replace matched no row: the record was removed or changed underneath us.
    #[error("no row replaced for book {0}")]
    Conflict(i64),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return StoreError::Constraint(db_err.message().to_string());
            }
        }
        StoreError::Other(anyhow::Error::new(err))
    }
}

#[async_trait]
pub trait BookStore: Send + Sync {
    /// All records ordered by id.
    async fn list(&self) -> StoreResult<Vec<Book>>;
    async fn find(&self, id: i64) -> StoreResult<Option<Book>>;
    /// Inserts a record and returns it with the assigned id.
    async fn insert(&self, book: NewBook) -> StoreResult<Book>;
    /// Overwrites every field of `book.id`; `Conflict` when no row was replaced.
    async fn replace(&self, book: &Book) -> StoreResult<()>;
    /// Returns whether a row was removed.
    async fn remove(&self, id: i64) -> StoreResult<bool>;
    async fn exists(&self, id: i64) -> StoreResult<bool>;
    /// Records matching every criterion of `filter`, ordered by id.
    async fn search(&self, filter: &BookFilter) -> StoreResult<Vec<Book>>;
    /// All records ordered by `field`; ties follow id in the same direction.
    async fn sorted(&self, field: SortField, order: SortOrder) -> StoreResult<Vec<Book>>;
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> StoreResult<()>;
}
