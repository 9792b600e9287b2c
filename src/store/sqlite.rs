use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{BookStore, StoreError, StoreResult};
use crate::types::{Book, BookFilter, NewBook, SortField, SortOrder};

const SELECT_BOOKS: &str = "SELECT id, title, author, year, genre FROM books";

#[derive(Clone)]
pub struct SqliteBookStore {
    pool: SqlitePool,
}

impl SqliteBookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn list(&self) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!("{} ORDER BY id", SELECT_BOOKS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&format!("{} WHERE id = ?1", SELECT_BOOKS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, book: NewBook) -> StoreResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"INSERT INTO books (title, author, year, genre) VALUES (?1, ?2, ?3, ?4)
               RETURNING id, title, author, year, genre"#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .bind(&book.genre)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn replace(&self, book: &Book) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE books SET title = ?1, author = ?2, year = ?3, genre = ?4 WHERE id = ?5",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .bind(&book.genre)
        .bind(book.id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(book.id));
        }
        Ok(())
    }

    async fn remove(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?1").bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found != 0)
    }

    async fn search(&self, filter: &BookFilter) -> StoreResult<Vec<Book>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_BOOKS);
        qb.push(" WHERE 1 = 1");
        // instr() is case-sensitive, unlike LIKE for ASCII
        if let Some(author) = filter.author.as_deref() {
            qb.push(" AND instr(author, ").push_bind(author).push(") > 0");
        }
        if let Some(year) = filter.year {
            qb.push(" AND year = ").push_bind(year);
        }
        qb.push(" ORDER BY id");
        let rows = qb.build_query_as::<Book>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn sorted(&self, field: SortField, order: SortOrder) -> StoreResult<Vec<Book>> {
        let direction = order.as_sql();
        let sql = format!(
            "{} ORDER BY {} {}, id {}",
            SELECT_BOOKS,
            field.column(),
            direction,
            direction
        );
        let rows = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
