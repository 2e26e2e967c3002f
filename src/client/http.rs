//! HttpCatalogApi - reqwest-backed implementation of the REST contract.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::{CatalogApi, ClientError};
use crate::catalog::{Brand, Category, Product, ProductPage, ProductQuery, Tag, Vendor};

/// reqwest implementation of [`CatalogApi`].
///
/// Holds a base URL (e.g. `https://host/api/apps/ecommerce`) and an owned
/// `reqwest::Client`. The client is cheap to clone and connection-pooled,
/// so one `HttpCatalogApi` can back every store in the composition root.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    base_url: String,
    client: Client,
}

impl HttpCatalogApi {
    /// Create a client for the given base URL with a default
    /// `reqwest::Client`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client` (shared
    /// connection pool, custom timeouts, middleware).
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        path: &str,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response, path).await
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn brands(&self) -> Result<Vec<Brand>, ClientError> {
        self.get_json("inventory/brands").await
    }

    async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get_json("inventory/categories").await
    }

    async fn vendors(&self) -> Result<Vec<Vendor>, ClientError> {
        self.get_json("inventory/vendors").await
    }

    async fn tags(&self) -> Result<Vec<Tag>, ClientError> {
        self.get_json("inventory/tags").await
    }

    async fn products(&self, query: &ProductQuery) -> Result<ProductPage, ClientError> {
        let path = "inventory/products";
        let response = self
            .client
            .get(self.url(path))
            .query(&query.to_pairs())
            .send()
            .await?;
        Self::decode(response, path).await
    }

    async fn create_product(&self) -> Result<Product, ClientError> {
        let path = "contracts/product";
        let response = self
            .client
            .post(self.url(path))
            .json(&json!({}))
            .send()
            .await?;
        Self::decode(response, path).await
    }

    async fn update_product(&self, id: &str, product: &Product) -> Result<Product, ClientError> {
        let path = "contracts/product";
        let response = self
            .client
            .patch(self.url(path))
            .json(&json!({ "id": id, "product": product }))
            .send()
            .await?;
        Self::decode(response, path).await
    }

    async fn delete_product(&self, id: &str) -> Result<bool, ClientError> {
        let path = "contracts/product";
        let response = self
            .client
            .delete(self.url(path))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::decode(response, path).await
    }

    async fn create_tag(&self, tag: &Tag) -> Result<Tag, ClientError> {
        let path = "contracts/tag";
        let response = self
            .client
            .post(self.url(path))
            .json(&json!({ "tag": tag }))
            .send()
            .await?;
        Self::decode(response, path).await
    }

    async fn update_tag(&self, id: &str, tag: &Tag) -> Result<Tag, ClientError> {
        let path = "contracts/tag";
        let response = self
            .client
            .patch(self.url(path))
            .json(&json!({ "id": id, "tag": tag }))
            .send()
            .await?;
        Self::decode(response, path).await
    }

    async fn delete_tag(&self, id: &str) -> Result<bool, ClientError> {
        let path = "contracts/tag";
        let response = self
            .client
            .delete(self.url(path))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::decode(response, path).await
    }

    async fn dashboard(&self) -> Result<Value, ClientError> {
        self.get_json("dashboard").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = HttpCatalogApi::new("https://example.com/api/");
        assert_eq!(
            api.url("inventory/brands"),
            "https://example.com/api/inventory/brands"
        );
    }

    #[test]
    fn url_joins_mutation_paths() {
        let api = HttpCatalogApi::new("https://example.com/api");
        assert_eq!(
            api.url("contracts/product"),
            "https://example.com/api/contracts/product"
        );
    }
}
