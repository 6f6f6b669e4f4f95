//! Boundary validation of JSON request bodies.
//!
//! Bodies are inspected as raw [`Value`]s rather than deserialized directly so
//! that a rejection can name the offending field. Fields are checked in a
//! fixed order (title, description, rating, comment) and the first failure
//! wins.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::book::types::{BookDraft, BookPatch};

/// A request body rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Offending field, or `None` when the body as a whole is malformed.
    pub field: Option<&'static str>,
    pub message: String,
}

impl ValidationError {
    fn body(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    fn required(field: &'static str) -> Self {
        Self {
            field: Some(field),
            message: format!("{field} is required"),
        }
    }

    fn empty(field: &'static str) -> Self {
        Self {
            field: Some(field),
            message: format!("{field} must not be empty"),
        }
    }

    fn not_text(field: &'static str) -> Self {
        Self {
            field: Some(field),
            message: format!("{field} must be a string"),
        }
    }

    fn not_integer() -> Self {
        Self {
            field: Some("rating"),
            message: "rating must be an integer".to_string(),
        }
    }
}

/// Validate a create body. Every field is required.
pub fn parse_draft(body: &[u8]) -> Result<BookDraft, ValidationError> {
    let object = parse_object(body)?;

    let title = required_text(&object, "title")?;
    let description = required_text(&object, "description")?;
    let rating = match object.get("rating") {
        None => return Err(ValidationError::required("rating")),
        Some(value) => integer(value)?,
    };
    let comment = required_text(&object, "comment")?;

    Ok(BookDraft {
        title,
        description,
        rating,
        comment,
    })
}

/// Validate an update body. Absent fields stay `None`; present ones
/// (including `null`) must satisfy the same rules as on create.
pub fn parse_patch(body: &[u8]) -> Result<BookPatch, ValidationError> {
    let object = parse_object(body)?;

    let title = optional_text(&object, "title")?;
    let description = optional_text(&object, "description")?;
    let rating = object.get("rating").map(integer).transpose()?;
    let comment = optional_text(&object, "comment")?;

    Ok(BookPatch {
        title,
        description,
        rating,
        comment,
    })
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) | Err(_) => Err(ValidationError::body("request body must be a JSON object")),
    }
}

fn required_text(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match object.get(field) {
        None => Err(ValidationError::required(field)),
        Some(value) => text(value, field),
    }
}

fn optional_text(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    object.get(field).map(|value| text(value, field)).transpose()
}

fn text(value: &Value, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Value::String(s) if s.is_empty() => Err(ValidationError::empty(field)),
        Value::String(s) => Ok(s.clone()),
        Value::Null => Err(ValidationError::empty(field)),
        _ => Err(ValidationError::not_text(field)),
    }
}

// Integer-valued strings are accepted alongside JSON integers.
fn integer(value: &Value) -> Result<i64, ValidationError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(ValidationError::not_integer),
        Value::String(s) if s.is_empty() => Err(ValidationError::empty("rating")),
        Value::String(s) => s.trim().parse().map_err(|_| ValidationError::not_integer()),
        Value::Null => Err(ValidationError::empty("rating")),
        _ => Err(ValidationError::not_integer()),
    }
}
