//! Client side of the book CRUD contract.
//!
//! [`BookApi`] is the seam the session layer depends on; [`ResourceClient`]
//! implements it over HTTP. Every failure comes back as a [`ClientError`]
//! whose message is ready to show to a user.

mod error;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::book::{Book, BookDraft, BookId, BookPatch};
use crate::config::ClientConfig;

pub use error::{ClientError, FALLBACK_MESSAGE};

const BOOKS_PATH: &str = "/api/books";

/// The five CRUD operations. Implementations perform no local state changes.
#[async_trait]
pub trait BookApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Book>, ClientError>;

    async fn get(&self, id: &BookId) -> Result<Book, ClientError>;

    async fn create(&self, draft: &BookDraft) -> Result<Book, ClientError>;

    async fn update(&self, id: &BookId, patch: &BookPatch) -> Result<Book, ClientError>;

    async fn delete(&self, id: &BookId) -> Result<(), ClientError>;
}

/// HTTP implementation of [`BookApi`].
#[derive(Clone)]
pub struct ResourceClient {
    client: Client,
    base_url: String,
    books_url: Url,
}

impl ResourceClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                ClientError::transport()
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let books_url = Url::parse(&format!("{}{}", base_url, BOOKS_PATH))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                tracing::error!("Invalid server URL '{}'", config.base_url);
                ClientError::transport()
            })?;

        Ok(Self {
            client,
            base_url,
            books_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> Url {
        self.books_url.clone()
    }

    /// The id is percent-encoded as a single path segment.
    fn item_url(&self, id: &BookId) -> Url {
        let mut url = self.books_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.as_str());
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!("Request failed before a response arrived: {}", e);
            ClientError::transport()
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let err = ClientError::from_response(status, &body);
        tracing::debug!(status = status.as_u16(), error = %err, "Request rejected");
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::debug!("Failed to decode response body: {}", e);
            ClientError::transport()
        })
    }
}

#[async_trait]
impl BookApi for ResourceClient {
    async fn list(&self) -> Result<Vec<Book>, ClientError> {
        self.send_json(self.client.get(self.collection_url())).await
    }

    async fn get(&self, id: &BookId) -> Result<Book, ClientError> {
        self.send_json(self.client.get(self.item_url(id))).await
    }

    async fn create(&self, draft: &BookDraft) -> Result<Book, ClientError> {
        self.send_json(self.client.post(self.collection_url()).json(draft))
            .await
    }

    async fn update(&self, id: &BookId, patch: &BookPatch) -> Result<Book, ClientError> {
        self.send_json(self.client.patch(self.item_url(id)).json(patch))
            .await
    }

    async fn delete(&self, id: &BookId) -> Result<(), ClientError> {
        self.send(self.client.delete(self.item_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_trimmed_base() {
        let config = ClientConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..ClientConfig::default()
        };
        let client = ResourceClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(
            client.collection_url().as_str(),
            "http://localhost:9000/api/books"
        );
        assert_eq!(
            client.item_url(&BookId::from("abc")).as_str(),
            "http://localhost:9000/api/books/abc"
        );
    }

    #[test]
    fn ids_are_escaped_as_one_path_segment() {
        let client = ResourceClient::new(&ClientConfig::default()).unwrap();
        let url = client.item_url(&BookId::from("a/b?c#d"));
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/books/a%2Fb%3Fc%23d");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(ResourceClient::new(&config).is_err());
    }
}
