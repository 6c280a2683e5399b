//! Catalog API client — the three read/write round trips the application
//! performs, behind the [`CatalogApi`] trait so the controller can be driven
//! against a fake server in tests.
//!
//! The wire contract: `GET /products` returns the full record sequence;
//! `PUT /products/{id}` and `POST /products` take the editable-field body
//! `{title, price, description, categoryId, images}` and return the updated
//! or created record. Any non-2xx status is a failure; 2xx bodies are
//! expected to be well-formed JSON matching the record shape.

use std::time::Duration;

use async_trait::async_trait;
use backroom_core::{Product, ProductPayload};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// The remote product API, as consumed by the sync controller.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn update_product(&self, id: u64, payload: &ProductPayload)
        -> Result<Product, ApiError>;
    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ApiError>;
}

/// reqwest-backed [`CatalogApi`] implementation.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Build a client for `base_url` with the given request timeout. The
    /// timeout is the only deadline enforced; individual operations are
    /// single-attempt and not cancellable once started.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Check the status and decode the body, mapping each failure to its
/// [`ApiError`] kind.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    response.json::<T>().await.map_err(Into::into)
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.client.get(self.url("products")).send().await?;
        read_json(response).await
    }

    async fn update_product(
        &self,
        id: u64,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("products/{id}")))
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ApiError> {
        let response = self
            .client
            .post(self.url("products"))
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }
}
