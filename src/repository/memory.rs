use chrono::Utc;
use parking_lot::RwLock;

use crate::book::{Book, BookDraft, BookId, BookPatch};
use crate::repository::{BookRepository, RepositoryError};

/// Volatile repository; contents are lost with the process.
#[derive(Default)]
pub struct MemoryRepository {
    books: RwLock<Vec<Book>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

impl BookRepository for MemoryRepository {
    fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.books.read().clone())
    }

    fn get(&self, id: &BookId) -> Result<Option<Book>, RepositoryError> {
        Ok(find(&self.books.read(), id).cloned())
    }

    fn insert(&self, draft: BookDraft) -> Result<Book, RepositoryError> {
        Ok(insert(&mut self.books.write(), draft))
    }

    fn update(&self, id: &BookId, patch: BookPatch) -> Result<Option<Book>, RepositoryError> {
        Ok(update(&mut self.books.write(), id, patch))
    }

    fn delete(&self, id: &BookId) -> Result<Option<Book>, RepositoryError> {
        Ok(delete(&mut self.books.write(), id))
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.books.read().len())
    }
}

pub(super) fn find<'a>(books: &'a [Book], id: &BookId) -> Option<&'a Book> {
    books.iter().find(|book| &book.id == id)
}

pub(super) fn insert(books: &mut Vec<Book>, draft: BookDraft) -> Book {
    let book = Book::from_draft(BookId::generate(), draft, Utc::now());
    books.insert(0, book.clone());
    book
}

pub(super) fn update(books: &mut Vec<Book>, id: &BookId, patch: BookPatch) -> Option<Book> {
    let index = books.iter().position(|book| &book.id == id)?;
    let mut book = books.remove(index);
    book.apply(patch, Utc::now());
    books.insert(0, book.clone());
    Some(book)
}

pub(super) fn delete(books: &mut Vec<Book>, id: &BookId) -> Option<Book> {
    let index = books.iter().position(|book| &book.id == id)?;
    Some(books.remove(index))
}
