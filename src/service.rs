//! The book record service.
//!
//! Each operation is stateless: it validates its input, makes (at most) one store
//! round trip on the happy path and turns the outcome into an [`AppResult`]. HTTP
//! status codes are decided later, when the error is rendered.

use std::sync::Arc;

use crate::error::{validation, AppError, AppResult};
use crate::metrics::Metrics;
use crate::store::{BookStore, StoreError, StoreResult};
use crate::types::{Book, BookFilter, InvalidSortField, NewBook, SortField, SortOrder};

const BOOK_NOT_FOUND: &str = "Book not found";

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
    metrics: Metrics,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>, metrics: Metrics) -> Self {
        Self { store, metrics }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.list().await.map_err(|e| self.store_failure("list", e))
    }

    pub async fn get(&self, id: i64) -> AppResult<Book> {
        match self.store.find(id).await.map_err(|e| self.store_failure("get", e))? {
            Some(book) => Ok(book),
            None => Err(self.not_found(BOOK_NOT_FOUND)),
        }
    }

    /// `None` stands for a `null` request body.
    pub async fn create(&self, payload: Option<NewBook>) -> AppResult<Book> {
        let Some(payload) = payload else {
            return Err(AppError::BadRequest("Invalid book data".to_string()));
        };
        validate(&payload.title, &payload.author)?;

        let book = self.store.insert(payload).await.map_err(|e| self.store_failure("create", e))?;
        self.metrics.inc_created();
        tracing::info!(book_id = book.id, "book created");
        Ok(book)
    }

    /// Full replace of book `id`. The payload must carry the same id.
    pub async fn update(&self, id: i64, book: Book) -> AppResult<()> {
        if id != book.id {
            return Err(AppError::BadRequest("ID mismatch".to_string()));
        }
        validate(&book.title, &book.author)?;

        match self.store.replace(&book).await {
            Ok(()) => {
                self.metrics.inc_updated();
                tracing::info!(book_id = id, "book replaced");
                Ok(())
            }
            Err(StoreError::Conflict(_)) => {
                // Deleted between the client's read and this write
                let still_there =
                    self.store.exists(id).await.map_err(|e| self.store_failure("update", e))?;
                if !still_there {
                    return Err(self.not_found(BOOK_NOT_FOUND));
                }
                Err(self.store_failure("update", StoreError::Conflict(id)))
            }
            Err(e) => Err(self.store_failure("update", e)),
        }
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let found = self.store.find(id).await.map_err(|e| self.store_failure("delete", e))?;
        if found.is_none() {
            return Err(self.not_found(BOOK_NOT_FOUND));
        }
        let removed = self.store.remove(id).await.map_err(|e| self.store_failure("delete", e))?;
        if !removed {
            return Err(self.not_found(BOOK_NOT_FOUND));
        }
        self.metrics.inc_deleted();
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }

    /// An empty match set is reported as not found rather than as an empty list.
    pub async fn search(&self, filter: BookFilter) -> AppResult<Vec<Book>> {
        let filter = filter.normalized();
        self.metrics.inc_searches();
        let books = self.store.search(&filter).await.map_err(|e| self.store_failure("search", e))?;
        if books.is_empty() {
            tracing::debug!(author = ?filter.author, year = ?filter.year, "search matched nothing");
            return Err(self.not_found("No books found"));
        }
        Ok(books)
    }

    /// The field is checked against [`SortField`] before the store is touched.
    pub async fn sort(&self, field: Option<&str>, order: Option<&str>) -> AppResult<Vec<Book>> {
        let field = field.unwrap_or("").parse::<SortField>().map_err(|e: InvalidSortField| {
            tracing::debug!(field = %e.0, "rejected sort field");
            AppError::InvalidInput(e.to_string())
        })?;
        let order = SortOrder::from_param(order);
        self.metrics.inc_sorts();
        self.store.sorted(field, order).await.map_err(|e| self.store_failure("sort", e))
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.store.ping().await
    }

    fn not_found(&self, message: &str) -> AppError {
        self.metrics.inc_not_found();
        AppError::NotFound(message.to_string())
    }

    fn store_failure(&self, operation: &'static str, err: StoreError) -> AppError {
        self.metrics.inc_store_failures();
        tracing::error!(operation, error = %err, "book store failure");
        AppError::from(err)
    }
}

fn validate(title: &str, author: &str) -> AppResult<()> {
    validation::require_text(title, "title")?;
    validation::require_text(author, "author")
}
