//! Product gateway - the boundary to the remote store
//!
//! `ProductGateway` is the seam every controller receives at
//! construction; `HttpGateway` is the network implementation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{Product, ProductPayload};
use tracing::debug;

use crate::{ClientConfig, GatewayError, GatewayResult};

/// Remote product store operations
///
/// Every call is a fresh round trip; filtering and persistence belong
/// to the store. All calls may fail with a [`GatewayError`].
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// List products, optionally filtered server-side by a name substring.
    /// An absent or empty query returns the unfiltered collection.
    async fn list(&self, query: Option<&str>) -> GatewayResult<Vec<Product>>;

    /// Fetch a single product by id
    async fn get(&self, id: &str) -> GatewayResult<Product>;

    /// Create a product, returning the record with its assigned id
    async fn create(&self, payload: &ProductPayload) -> GatewayResult<Product>;

    /// Update an existing product
    async fn update(&self, id: &str, payload: &ProductPayload) -> GatewayResult<Product>;

    /// Delete a product
    async fn delete(&self, id: &str) -> GatewayResult<()>;
}

/// HTTP gateway over the store's REST API
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a new HTTP gateway from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::NOT_FOUND => Err(GatewayError::NotFound(text)),
                _ => Err(GatewayError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl ProductGateway for HttpGateway {
    async fn list(&self, query: Option<&str>) -> GatewayResult<Vec<Product>> {
        let mut request = self.client.get(self.url("/api/products"));
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            request = request.query(&[("q", q)]);
        }

        debug!("listing products (query: {query:?})");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn get(&self, id: &str) -> GatewayResult<Product> {
        let response = self
            .client
            .get(self.url(&format!("/api/products/{id}")))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn create(&self, payload: &ProductPayload) -> GatewayResult<Product> {
        let response = self
            .client
            .post(self.url("/api/products"))
            .json(payload)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn update(&self, id: &str, payload: &ProductPayload) -> GatewayResult<Product> {
        let response = self
            .client
            .put(self.url(&format!("/api/products/{id}")))
            .json(payload)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/products/{id}")))
            .send()
            .await?;

        // Delete answers with an empty body; only the status matters.
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::NOT_FOUND => Err(GatewayError::NotFound(text)),
                _ => Err(GatewayError::Internal(text)),
            };
        }
        Ok(())
    }
}
