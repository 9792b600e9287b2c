//! HTTP route handlers for the Bookshelf API.
//!
//! - `books`: the book record resource under [`BOOKS_ROOT`]
//! - `health`: liveness, readiness, metrics and version endpoints

pub mod books;
pub mod health;

use axum::{extract::DefaultBodyLimit, middleware::from_fn_with_state, routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{error::AppError, middleware::security_headers::security_headers_middleware, state::AppState};

/// Mount point of the book resource; also the prefix of `Location` headers.
pub const BOOKS_ROOT: &str = "/api/books";

/// Builds the full application router with its middleware stack.
pub fn router(state: AppState) -> Router {
    let books = Router::new()
        .route("/", get(books::list_books).post(books::create_book))
        .route("/search", get(books::search_books))
        .route("/sort", get(books::sort_books))
        .route("/{id}", get(books::get_book).put(books::update_book).delete(books::delete_book));

    let cfg = state.config.clone();
    let body_limit = cfg.server.max_body_bytes;

    // The nested "/" only matches the bare root
    let books_root_slash = format!("{}/", BOOKS_ROOT);

    let app = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route(&books_root_slash, get(books::list_books).post(books::create_book))
        .nest(BOOKS_ROOT, books)
        .fallback(fallback)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg, security_headers_middleware));

    // CORS: permissive in debug builds for local front-end development
    if cfg!(debug_assertions) {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

async fn fallback() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
