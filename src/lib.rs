//! # Bookshelf
//!
//! A small record service for a library's book catalogue. Books can be listed, fetched,
//! created, replaced and deleted, searched by author and year, and listed in a chosen
//! order, all over a JSON HTTP API.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP routing and extraction
//! - **SQLx**: asynchronous SQLite access
//! - **Tokio**: async runtime
//! - **Serde**: JSON (de)serialization
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (embedded defaults, file, environment)
//! - [`db`]: pool creation and schema initialization
//! - [`error`]: `AppError` and its mapping to HTTP responses
//! - [`metrics`]: request counters
//! - [`middleware`]: security headers
//! - [`routes`]: router construction and HTTP handlers
//! - [`service`]: the book record operations
//! - [`state`]: shared application state
//! - [`store`]: the `BookStore` trait with SQLite and in-memory implementations
//! - [`types`]: book records, search filter and sort parameters

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
