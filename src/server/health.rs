use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub books: usize,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    Ok(Json(HealthStatus {
        status: "healthy".to_string(),
        service: "bookshelf".to_string(),
        books: state.repository.count()?,
    }))
}
