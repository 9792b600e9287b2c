//! Unit and integration tests for Bookshelf.
//!
//! - **api_tests**: the book resource end to end through the router
//! - **service_tests**: service behaviour against in-memory and scripted stores
//! - **store_tests**: SQLite and in-memory stores agree on filtering and ordering
//! - **error_tests**: error display and HTTP mapping
//! - **config_tests**: configuration loading and validation
//! - **db_tests**: schema initialization
//! - **health_api_tests**: health, readiness, metrics and version endpoints
//!
//! Run a single group with e.g. `cargo test api_tests`.

pub mod config_tests;
pub mod db_tests;
pub mod error_tests;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::types::NewBook;

/// A fresh in-memory database with the schema applied. One connection, since every
/// `sqlite::memory:` connection would otherwise see its own empty database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
    crate::db::init_db(&pool).await.unwrap();
    pool
}

pub fn new_book(title: &str, author: &str, year: i32, genre: &str) -> NewBook {
    NewBook { title: title.to_string(), author: author.to_string(), year, genre: genre.to_string() }
}

/// Four books, inserted in this order (ids 1..=4).
pub fn catalogue() -> Vec<NewBook> {
    vec![
        new_book("The Hobbit", "J.R.R. Tolkien", 1937, "Fantasy"),
        new_book("The Lord of the Rings", "J.R.R. Tolkien", 1954, "Fantasy"),
        new_book("Dune", "Frank Herbert", 1965, "SciFi"),
        new_book("A Wizard of Earthsea", "Ursula K. Le Guin", 1968, "Fantasy"),
    ]
}
