//! In-process stand-in for the HTTP API.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use bookshelf::book::{parse_draft, parse_patch, Book, BookDraft, BookId, BookPatch};
use bookshelf::client::{BookApi, ClientError};
use bookshelf::repository::{BookRepository, MemoryRepository};

/// Applies the same validation and storage rules as the real server, without
/// a network hop. Individual operations can be forced to fail.
pub struct MockApi {
    repository: MemoryRepository,
    list_failure: Mutex<Option<ClientError>>,
    list_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            repository: MemoryRepository::with_books(books),
            list_failure: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_list(&self, err: ClientError) {
        *self.list_failure.lock() = Some(err);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn not_found() -> ClientError {
        ClientError::NotFound("No such book".to_string())
    }
}

#[async_trait]
impl BookApi for MockApi {
    async fn list(&self) -> Result<Vec<Book>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.list_failure.lock().clone() {
            return Err(err);
        }
        Ok(self.repository.list().unwrap())
    }

    async fn get(&self, id: &BookId) -> Result<Book, ClientError> {
        self.repository.get(id).unwrap().ok_or_else(Self::not_found)
    }

    async fn create(&self, draft: &BookDraft) -> Result<Book, ClientError> {
        let body = serde_json::to_vec(draft).unwrap();
        let draft = parse_draft(&body).map_err(|e| ClientError::Validation(e.message))?;
        Ok(self.repository.insert(draft).unwrap())
    }

    async fn update(&self, id: &BookId, patch: &BookPatch) -> Result<Book, ClientError> {
        let body = serde_json::to_vec(patch).unwrap();
        let patch = parse_patch(&body).map_err(|e| ClientError::Validation(e.message))?;
        self.repository
            .update(id, patch)
            .unwrap()
            .ok_or_else(Self::not_found)
    }

    async fn delete(&self, id: &BookId) -> Result<(), ClientError> {
        self.repository
            .delete(id)
            .unwrap()
            .map(|_| ())
            .ok_or_else(Self::not_found)
    }
}
