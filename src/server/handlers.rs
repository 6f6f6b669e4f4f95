//! Handlers for `/api/books`.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::book::{parse_draft, parse_patch, Book, BookId};
use crate::server::error::ApiError;
use crate::server::router::AppState;

/// `GET /api/books`
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.repository.list()?))
}

/// `GET /api/books/{id}`
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id = BookId::from(id);
    match state.repository.get(&id)? {
        Some(book) => Ok(Json(book)),
        None => Err(ApiError::NotFound(id)),
    }
}

/// `POST /api/books`
pub async fn create_book(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let draft = parse_draft(&body)?;
    let book = state.repository.insert(draft)?;
    tracing::info!(id = %book.id, title = %book.title, "Book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// `PATCH /api/books/{id}`
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Book>, ApiError> {
    let id = BookId::from(id);
    let patch = parse_patch(&body)?;
    match state.repository.update(&id, patch)? {
        Some(book) => {
            tracing::info!(id = %book.id, "Book updated");
            Ok(Json(book))
        }
        None => Err(ApiError::NotFound(id)),
    }
}

/// `DELETE /api/books/{id}`
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = BookId::from(id);
    match state.repository.delete(&id)? {
        Some(book) => {
            tracing::info!(id = %book.id, "Book deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::NotFound(id)),
    }
}
