use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::service::BookService;
use crate::store::{BookStore, SqliteBookStore};

/// The shared application state.
///
/// Cloned into every handler by axum. The only stateful dependency is the store held
/// by [`BookService`]; everything else is read-only or atomic counters.
#[derive(Clone)]
pub struct AppState {
    pub books: BookService,
    pub config: Arc<AppConfig>,
    pub metrics: Metrics,
}

impl AppState {
    /// Builds the state around an injected store.
    pub fn new(store: Arc<dyn BookStore>, config: AppConfig) -> Self {
        let metrics = Metrics::new();
        Self { books: BookService::new(store, metrics.clone()), config: Arc::new(config), metrics }
    }

    pub fn with_pool(pool: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self::new(Arc::new(SqliteBookStore::new(pool)), config)
    }
}
