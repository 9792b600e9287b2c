use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, StoreError, StoreResult};
use crate::types::{Book, BookFilter, NewBook, SortField, SortOrder};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Book>,
    last_id: i64,
}

/// Process-local store. Ids are never reused, matching an autoincrement column.
#[derive(Default)]
pub struct MemoryBookStore {
    table: RwLock<Table>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> StoreResult<Vec<Book>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Book>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, book: NewBook) -> StoreResult<Book> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let book = book.with_id(table.last_id);
        table.rows.insert(book.id, book.clone());
        Ok(book)
    }

    async fn replace(&self, book: &Book) -> StoreResult<()> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&book.id) {
            Some(row) => {
                *row = book.clone();
                Ok(())
            }
            None => Err(StoreError::Conflict(book.id)),
        }
    }

    async fn remove(&self, id: i64) -> StoreResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn search(&self, filter: &BookFilter) -> StoreResult<Vec<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.values().filter(|b| filter.matches(b)).cloned().collect())
    }

    async fn sorted(&self, field: SortField, order: SortOrder) -> StoreResult<Vec<Book>> {
        let mut rows: Vec<Book> = self.table.read().await.rows.values().cloned().collect();
        match order {
            SortOrder::Asc => rows.sort_by(|a, b| field.compare(a, b)),
            SortOrder::Desc => rows.sort_by(|a, b| field.compare(b, a)),
        }
        Ok(rows)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
