use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Health check endpoint - lightweight, never touches the store
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: round trip to the store with timeout protection
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match tokio::time::timeout(std::time::Duration::from_secs(5), state.books.ping()).await {
        Ok(Ok(())) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP bookshelf_books_created Total books created\n# TYPE bookshelf_books_created counter\nbookshelf_books_created {}\n\
# HELP bookshelf_books_updated Total books replaced\n# TYPE bookshelf_books_updated counter\nbookshelf_books_updated {}\n\
# HELP bookshelf_books_deleted Total books deleted\n# TYPE bookshelf_books_deleted counter\nbookshelf_books_deleted {}\n\
# HELP bookshelf_searches Search requests served\n# TYPE bookshelf_searches counter\nbookshelf_searches {}\n\
# HELP bookshelf_sorts Sort requests served\n# TYPE bookshelf_sorts counter\nbookshelf_sorts {}\n\
# HELP bookshelf_not_found Not-found responses\n# TYPE bookshelf_not_found counter\nbookshelf_not_found {}\n\
# HELP bookshelf_store_failures Failed store calls\n# TYPE bookshelf_store_failures counter\nbookshelf_store_failures {}\n\
# HELP bookshelf_uptime_seconds Uptime seconds\n# TYPE bookshelf_uptime_seconds gauge\nbookshelf_uptime_seconds {}\n",
        m.books_created,
        m.books_updated,
        m.books_deleted,
        m.searches,
        m.sorts,
        m.not_found,
        m.store_failures,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
