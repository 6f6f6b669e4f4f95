use crate::book::{Book, BookId};
use crate::ui::mvi::UiState;

/// Ordered view of all books, most recently created or updated first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookCollection {
    books: Vec<Book>,
}

impl UiState for BookCollection {}

impl BookCollection {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| &book.id == id)
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    pub(super) fn into_books(self) -> Vec<Book> {
        self.books
    }
}

impl<'a> IntoIterator for &'a BookCollection {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
