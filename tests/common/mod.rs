//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use std::path::PathBuf;
use std::sync::Arc;

use bookshelf::book::{Book, BookDraft, BookId};
use bookshelf::client::ResourceClient;
use bookshelf::config::{ClientConfig, Config, ConfigStore, StorageBackend};
use bookshelf::repository::{BookRepository, MemoryRepository};
use bookshelf::server::{BookServer, ServerHandle};
use chrono::{TimeZone, Utc};

pub fn draft(title: &str) -> BookDraft {
    BookDraft {
        title: title.to_string(),
        description: format!("About {}", title),
        rating: 4,
        comment: "Worth reading".to_string(),
    }
}

/// A book with fixed timestamps so equality is deterministic.
pub fn book(id: &str, title: &str) -> Book {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    Book::from_draft(BookId::from(id), draft(title), at)
}

pub fn ids(books: &[Book]) -> Vec<&str> {
    books.iter().map(|b| b.id.as_str()).collect()
}

/// Config bound to an ephemeral localhost port with in-memory storage.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.bind_addr = "127.0.0.1:0".to_string();
    config.storage.backend = StorageBackend::Memory;
    config
}

/// A running server on a free port.
pub struct TestServer {
    pub handle: ServerHandle,
    pub base_url: String,
    pub repository: Arc<MemoryRepository>,
}

impl TestServer {
    pub async fn start() -> Self {
        let store = ConfigStore::new(test_config(), PathBuf::from("/tmp/bookshelf-test.toml"));
        let repository = Arc::new(MemoryRepository::new());
        let mut server = BookServer::new(&store, repository.clone()).unwrap();
        let addr = server.bind().await.unwrap();
        let handle = server.handle();
        tokio::spawn(server.run());

        Self {
            handle,
            base_url: format!("http://{}", addr),
            repository,
        }
    }

    pub fn client(&self) -> ResourceClient {
        let config = ClientConfig {
            base_url: self.base_url.clone(),
            timeout_seconds: 5,
            connect_timeout_seconds: 2,
        };
        ResourceClient::new(&config).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}
