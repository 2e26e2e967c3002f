//! HTTP boundary - the REST contract the stores fetch through.
//!
//! `CatalogApi` is the seam: stores are generic over it, the real
//! implementation is [`HttpCatalogApi`], and [`InMemoryCatalogApi`] serves
//! the same contract from a HashMap for tests and development.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_store::{CatalogApi, HttpCatalogApi, ProductQuery};
//!
//! let api = HttpCatalogApi::new("https://example.com/api/apps/ecommerce");
//! let page = api.products(&ProductQuery::default()).await?;
//! ```

mod http;
mod in_memory;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::catalog::{Brand, Category, Product, ProductPage, ProductQuery, Tag, Vendor};

pub use http::HttpCatalogApi;
pub use in_memory::InMemoryCatalogApi;

/// The REST operations the admin backend exposes for the catalog module.
///
/// Reads live under `inventory/`, mutations under `contracts/`. Every
/// method is one request/response round trip; no implementation caches.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET inventory/brands`
    async fn brands(&self) -> Result<Vec<Brand>, ClientError>;

    /// `GET inventory/categories`
    async fn categories(&self) -> Result<Vec<Category>, ClientError>;

    /// `GET inventory/vendors`
    async fn vendors(&self) -> Result<Vec<Vendor>, ClientError>;

    /// `GET inventory/tags`
    async fn tags(&self) -> Result<Vec<Tag>, ClientError>;

    /// `GET inventory/products` with paging/sort/search parameters.
    /// The server owns ordering and paging.
    async fn products(&self, query: &ProductQuery) -> Result<ProductPage, ClientError>;

    /// `POST contracts/product` with an empty body. The server mints a
    /// draft product and returns it.
    async fn create_product(&self) -> Result<Product, ClientError>;

    /// `PATCH contracts/product` with `{id, product}`.
    async fn update_product(&self, id: &str, product: &Product) -> Result<Product, ClientError>;

    /// `DELETE contracts/product?id=...`. Returns the server's deleted flag.
    async fn delete_product(&self, id: &str) -> Result<bool, ClientError>;

    /// `POST contracts/tag` with `{tag}`.
    async fn create_tag(&self, tag: &Tag) -> Result<Tag, ClientError>;

    /// `PATCH contracts/tag` with `{id, tag}`.
    async fn update_tag(&self, id: &str, tag: &Tag) -> Result<Tag, ClientError>;

    /// `DELETE contracts/tag?id=...`. Returns the server's deleted flag.
    async fn delete_tag(&self, id: &str) -> Result<bool, ClientError>;

    /// `GET dashboard` - the opaque widget payload for the dashboard view.
    async fn dashboard(&self) -> Result<Value, ClientError>;
}

/// Error type for HTTP boundary operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, request build).
    Transport(String),
    /// The server answered with a non-success status.
    Status { status: u16, path: String },
    /// The response body did not decode as the expected shape.
    Decode(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "transport error: {}", msg),
            ClientError::Status { status, path } => {
                write!(f, "server returned status {} for {}", status, path)
            }
            ClientError::Decode(msg) => write!(f, "response decode error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
