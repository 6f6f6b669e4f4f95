use crate::book::{Book, BookId};
use crate::ui::mvi::Intent;

/// One change to the client's book collection.
///
/// Only dispatched after the server has confirmed the matching operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BookIntent {
    /// Replace everything with a fresh server listing, order preserved.
    Init(Vec<Book>),
    /// Prepend a newly created book. Its id must not already be present.
    Add(Book),
    /// Drop the book with this id, if present.
    Remove(BookId),
    /// Drop any entry with the same id, then prepend the given book.
    Replace(Book),
}

impl Intent for BookIntent {}
