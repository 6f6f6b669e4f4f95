//! Book resource model and request-body validation.
//!
//! A [`Book`] is what the repository stores and the wire carries. Drafts and
//! patches are the validated inputs for create and update.

mod types;
mod validation;

pub use types::{Book, BookDraft, BookId, BookPatch};
pub use validation::{parse_draft, parse_patch, ValidationError};
