//! Glue between user actions, the resource client, and the stores.
//!
//! Every mutation awaits the server first and dispatches only on success, so
//! the collection never holds speculative state. A failed call returns its
//! message and leaves the collection untouched.

use crate::book::{Book, BookDraft, BookId, BookPatch};
use crate::client::{BookApi, ClientError};
use crate::ui::books::{BookCollection, BookIntent, BooksReducer};
use crate::ui::bootstrap::{BootstrapIntent, BootstrapReducer, BootstrapState};
use crate::ui::store::Store;

/// One client session: a book collection plus its bootstrap lifecycle.
pub struct BookSession<A> {
    api: A,
    books: Store<BooksReducer>,
    bootstrap: Store<BootstrapReducer>,
}

impl<A: BookApi> BookSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            books: Store::new(),
            bootstrap: Store::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// The collection store, for subscribing and reading snapshots.
    pub fn books(&self) -> &Store<BooksReducer> {
        &self.books
    }

    pub fn bootstrap(&self) -> &Store<BootstrapReducer> {
        &self.bootstrap
    }

    pub fn collection(&self) -> BookCollection {
        self.books.state()
    }

    /// Load the collection. Only the first call issues a `list()`; later
    /// calls return the current bootstrap state. Failures are not retried.
    pub async fn mount(&self) -> BootstrapState {
        if !self.bootstrap.dispatch(BootstrapIntent::Start) {
            return self.bootstrap.state();
        }

        match self.api.list().await {
            Ok(books) => {
                tracing::debug!(count = books.len(), "Collection loaded");
                self.books.dispatch(BookIntent::Init(books));
                self.bootstrap.dispatch(BootstrapIntent::Loaded);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Initial load failed");
                self.bootstrap
                    .dispatch(BootstrapIntent::Failed(err.message().to_string()));
            }
        }

        self.bootstrap.state()
    }

    /// Fetch one book. Does not touch the collection.
    pub async fn fetch(&self, id: &BookId) -> Result<Book, ClientError> {
        self.api.get(id).await
    }

    pub async fn create(&self, draft: BookDraft) -> Result<Book, ClientError> {
        let book = self.api.create(&draft).await?;
        self.books.dispatch(BookIntent::Add(book.clone()));
        Ok(book)
    }

    pub async fn update(&self, id: &BookId, patch: BookPatch) -> Result<Book, ClientError> {
        let book = self.api.update(id, &patch).await?;
        self.books.dispatch(BookIntent::Replace(book.clone()));
        Ok(book)
    }

    pub async fn delete(&self, id: &BookId) -> Result<(), ClientError> {
        self.api.delete(id).await?;
        self.books.dispatch(BookIntent::Remove(id.clone()));
        Ok(())
    }
}
