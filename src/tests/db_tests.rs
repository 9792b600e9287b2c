#[cfg(test)]
mod tests {
    use crate::config::DatabaseConfig;
    use crate::db;
    use crate::tests::memory_pool;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_db_creates_books_table() {
        let pool = memory_pool().await;

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert!(tables.contains(&"books".to_string()));

        let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('books') ORDER BY cid")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(columns, vec!["id", "title", "author", "year", "genre"]);
    }

    #[tokio::test]
    async fn test_init_db_is_idempotent() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO books (title, author, year, genre) VALUES ('Dune', 'Herbert', 1965, 'SciFi')")
            .execute(&pool)
            .await
            .unwrap();

        db::init_db(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books").fetch_one(&pool).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_connect_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nested").join("books.db");
        let cfg = DatabaseConfig { url: format!("sqlite://{}", file.display()), max_connections: 2 };

        let pool = db::connect(&cfg).await.unwrap();
        db::init_db(&pool).await.unwrap();
        assert!(file.exists());
        pool.close().await;
    }
}
