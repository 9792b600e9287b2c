use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::BOOKS_ROOT;
use crate::{
    error::AppResult,
    state::AppState,
    types::{Book, BookFilter, NewBook, SortQuery},
};

// Extractors are taken as `Result` so rejections render as the usual JSON error payload.

pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    Ok(Json(state.books.list().await?))
}

pub async fn get_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Book>> {
    let Path(id) = id?;
    Ok(Json(state.books.get(id).await?))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<Option<NewBook>>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let book = state.books.create(payload).await?;
    let location = format!("{}/{}", BOOKS_ROOT, book.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

pub async fn update_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Book>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    let Json(book) = payload?;
    state.books.update(id, book).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    state.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn search_books(
    State(state): State<AppState>,
    query: Result<Query<BookFilter>, QueryRejection>,
) -> AppResult<Json<Vec<Book>>> {
    let Query(filter) = query?;
    Ok(Json(state.books.search(filter).await?))
}

pub async fn sort_books(
    State(state): State<AppState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Book>>> {
    let Query(query) = query?;
    let books = state.books.sort(query.field.as_deref(), query.order.as_deref()).await?;
    Ok(Json(books))
}
