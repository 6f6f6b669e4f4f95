use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::repository::BookRepository;
use crate::server::handlers::{create_book, delete_book, get_book, list_books, update_book};
use crate::server::health::health;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn BookRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }
}

/// Assemble the application router.
///
/// `/api/books` carries the CRUD contract; unknown `/api` paths are 404.
/// With a `static_dir`, every other path is served from it and unknown files
/// fall back to its `index.html` so client-side routes resolve.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).patch(update_book).delete(delete_book),
        )
        .fallback(page_not_found);

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.fallback(page_not_found),
    };

    router.layer(TraceLayer::new_for_http())
}

async fn page_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Page Not Found")
}
