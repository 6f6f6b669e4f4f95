//! Document store for books.
//!
//! The server only talks to storage through [`BookRepository`]. Both
//! implementations keep books ordered most-recently-created-or-updated first,
//! so a fresh listing matches the order clients maintain locally.

mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::book::{Book, BookDraft, BookId, BookPatch};
use crate::config::{StorageBackend, StorageConfig};

pub use file::FileRepository;
pub use memory::MemoryRepository;

/// Storage faults. Missing books are not errors; lookups return `None`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Failed to access data file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data file '{path}' is not a valid book list: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Data file '{path}' is locked by another process")]
    Locked { path: PathBuf },
}

/// Persistence contract used by the HTTP handlers.
pub trait BookRepository: Send + Sync {
    /// All books, most recently touched first.
    fn list(&self) -> Result<Vec<Book>, RepositoryError>;

    fn get(&self, id: &BookId) -> Result<Option<Book>, RepositoryError>;

    /// Store a new book; the repository assigns the id and timestamps.
    fn insert(&self, draft: BookDraft) -> Result<Book, RepositoryError>;

    /// Apply `patch` and move the book to the front. `None` if absent.
    fn update(&self, id: &BookId, patch: BookPatch) -> Result<Option<Book>, RepositoryError>;

    /// Remove and return the book. `None` if absent.
    fn delete(&self, id: &BookId) -> Result<Option<Book>, RepositoryError>;

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.list()?.len())
    }
}

/// Open the repository selected by `config`.
pub fn open(config: &StorageConfig) -> Result<Arc<dyn BookRepository>, RepositoryError> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryRepository::new())),
        StorageBackend::File => {
            let path = config.resolved_path();
            Ok(Arc::new(FileRepository::open(path)?))
        }
    }
}
