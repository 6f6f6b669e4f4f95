use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Message used when a failure carries no usable `msg`.
pub const FALLBACK_MESSAGE: &str = "Please try again later.";

/// A failed client call, reduced to one displayable message.
///
/// The variant records what kind of failure happened; callers that only need
/// to show something to the user can rely on `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server rejected the submitted fields.
    #[error("{0}")]
    Validation(String),

    /// The id does not refer to an existing book.
    #[error("{0}")]
    NotFound(String),

    /// Network failure, server fault, or an unreadable response.
    #[error("{0}")]
    Transport(String),
}

impl ClientError {
    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation(msg)
            | ClientError::NotFound(msg)
            | ClientError::Transport(msg) => msg,
        }
    }

    /// Failure that never produced a usable server response.
    pub fn transport() -> Self {
        ClientError::Transport(FALLBACK_MESSAGE.to_string())
    }

    /// Classify a non-success response by status and extract `msg` from its
    /// body, falling back to [`FALLBACK_MESSAGE`].
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = extract_message(body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Transport(message),
        }
    }
}

#[derive(Deserialize)]
struct ErrorPayload {
    msg: Option<String>,
}

fn extract_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.msg)
        .filter(|msg| !msg.is_empty())
}
