//! Error types and response handling for the API server.
//!
//! Every failure leaves the server as `{ "msg": string }` with the status
//! code of the CRUD contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::book::{BookId, ValidationError};
use crate::repository::RepositoryError;

/// Message sent for any server-side fault. Details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub msg: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body rejected at the boundary
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No book with this id
    #[error("No book found for id '{0}'")]
    NotFound(BookId),

    /// Document store failure
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl ApiError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to put on the wire.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Storage(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        let body = ErrorBody {
            msg: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::parse_draft;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::from(parse_draft(b"{}").unwrap_err());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "title is required");
    }

    #[test]
    fn test_not_found_names_the_id() {
        let err = ApiError::NotFound(BookId::from("abc"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.public_message().contains("abc"));
    }

    #[test]
    fn test_storage_errors_are_not_leaked() {
        let err = ApiError::Storage(RepositoryError::Locked {
            path: "/secret/books.json".into(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_error_response_format() {
        let response = ApiError::NotFound(BookId::from("x")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
