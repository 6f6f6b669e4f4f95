use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned by the repository when a book is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Fresh identifier: 32 lowercase hex characters.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BookId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored book review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", alias = "id")]
    pub id: BookId,
    pub title: String,
    pub description: String,
    pub rating: i64,
    pub comment: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Materialize a draft under a new id, stamped with `now`.
    pub fn from_draft(id: BookId, draft: BookDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            rating: draft.rating,
            comment: draft.comment,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite only the fields present in `patch` and bump `updated_at`.
    pub fn apply(&mut self, patch: BookPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(comment) = patch.comment {
            self.comment = comment;
        }
        self.updated_at = now;
    }

    /// The user-editable fields of this book, without id or timestamps.
    pub fn draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            rating: self.rating,
            comment: self.comment.clone(),
        }
    }
}

/// Fields submitted on create. All are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub description: String,
    pub rating: i64,
    pub comment: String,
}

/// Fields submitted on update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.rating.is_none()
            && self.comment.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> BookDraft {
        BookDraft {
            title: "Dune".to_string(),
            description: "Desert planet".to_string(),
            rating: 5,
            comment: "Classic".to_string(),
        }
    }

    #[test]
    fn generated_ids_are_hex_and_distinct() {
        let a = BookId::generate();
        let b = BookId::generate();
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let mut book = Book::from_draft(BookId::from("abc"), draft(), created);

        book.apply(
            BookPatch {
                rating: Some(3),
                ..BookPatch::default()
            },
            later,
        );

        assert_eq!(book.rating, 3);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.created_at, created);
        assert_eq!(book.updated_at, later);
    }

    #[test]
    fn wire_shape_uses_underscore_id_and_camel_case_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let book = Book::from_draft(BookId::from("abc"), draft(), now);
        let value = serde_json::to_value(&book).unwrap();

        assert_eq!(value["_id"], "abc");
        assert_eq!(value["createdAt"], "2024-05-06T07:08:09Z");
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let json = serde_json::to_string(&BookPatch::default()).unwrap();
        assert_eq!(json, "{}");
        assert!(BookPatch::default().is_empty());
    }
}
