use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

use crate::config::{self, DatabaseConfig};

/// Opens the pool, creating the database file (and its directory) if needed.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let url = cfg.url.as_str();
    config::ensure_sqlite_parent_dir(url)?;
    if !url.contains(":memory:") && !Sqlite::database_exists(url).await.unwrap_or(false) {
        tracing::info!("Creating SQLite database at {}", url);
        Sqlite::create_database(url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                // Per-connection pragmas; failures are not fatal
                if let Err(e) = sqlx::query("PRAGMA busy_timeout=10000;").execute(&mut *conn).await {
                    tracing::warn!("Failed to set busy_timeout: {}", e);
                }
                if let Err(e) = sqlx::query("PRAGMA temp_store=MEMORY;").execute(&mut *conn).await {
                    tracing::warn!("Failed to set temp_store: {}", e);
                }
                Ok(())
            })
        })
        .connect(url)
        .await?;

    Ok(pool)
}

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }

    // AUTOINCREMENT: ids of deleted books are never handed out again
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            year INTEGER NOT NULL,
            genre TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        ("idx_books_author", "CREATE INDEX IF NOT EXISTS idx_books_author ON books(author)"),
        ("idx_books_year", "CREATE INDEX IF NOT EXISTS idx_books_year ON books(year)"),
        ("idx_books_title", "CREATE INDEX IF NOT EXISTS idx_books_title ON books(title)"),
    ];
    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            tracing::warn!("Failed to create index {}: {}", name, e);
        }
    }

    Ok(())
}
