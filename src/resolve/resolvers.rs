//! Concrete resolvers, one per route datum.
//!
//! Collection resolvers fetch and propagate failures unchanged. The
//! single-item [`ProductResolver`] is the one with redirect-on-failure
//! behavior: it logs the error, computes the parent of the target URL,
//! and aborts the navigation with that redirect instruction.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use super::{parent_url, Resolve, ResolveError, RouteTarget};
use crate::catalog::ProductQuery;
use crate::client::{CatalogApi, ClientError};
use crate::store::{CatalogStore, StoreError};

fn to_resolved<T: Serialize>(value: &T) -> Result<Value, ResolveError> {
    serde_json::to_value(value)
        .map_err(|e| ResolveError::Fetch(StoreError::Client(ClientError::Decode(e.to_string()))))
}

/// Resolves the brand collection.
pub struct BrandsResolver<C> {
    store: Arc<CatalogStore<C>>,
}

impl<C> BrandsResolver<C> {
    pub fn new(store: Arc<CatalogStore<C>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<C: CatalogApi + 'static> Resolve for BrandsResolver<C> {
    async fn resolve(&self, _target: &RouteTarget) -> Result<Value, ResolveError> {
        let brands = self.store.get_brands().await?;
        to_resolved(&brands)
    }
}

/// Resolves the category collection.
pub struct CategoriesResolver<C> {
    store: Arc<CatalogStore<C>>,
}

impl<C> CategoriesResolver<C> {
    pub fn new(store: Arc<CatalogStore<C>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<C: CatalogApi + 'static> Resolve for CategoriesResolver<C> {
    async fn resolve(&self, _target: &RouteTarget) -> Result<Value, ResolveError> {
        let categories = self.store.get_categories().await?;
        to_resolved(&categories)
    }
}

/// Resolves the vendor collection.
pub struct VendorsResolver<C> {
    store: Arc<CatalogStore<C>>,
}

impl<C> VendorsResolver<C> {
    pub fn new(store: Arc<CatalogStore<C>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<C: CatalogApi + 'static> Resolve for VendorsResolver<C> {
    async fn resolve(&self, _target: &RouteTarget) -> Result<Value, ResolveError> {
        let vendors = self.store.get_vendors().await?;
        to_resolved(&vendors)
    }
}

/// Resolves the tag collection.
pub struct TagsResolver<C> {
    store: Arc<CatalogStore<C>>,
}

impl<C> TagsResolver<C> {
    pub fn new(store: Arc<CatalogStore<C>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<C: CatalogApi + 'static> Resolve for TagsResolver<C> {
    async fn resolve(&self, _target: &RouteTarget) -> Result<Value, ResolveError> {
        let tags = self.store.get_tags().await?;
        to_resolved(&tags)
    }
}

/// Resolves one page of the product listing. Defaults to the first page
/// with the standard listing parameters; override with [`with_query`].
///
/// [`with_query`]: ProductsResolver::with_query
pub struct ProductsResolver<C> {
    store: Arc<CatalogStore<C>>,
    query: ProductQuery,
}

impl<C> ProductsResolver<C> {
    pub fn new(store: Arc<CatalogStore<C>>) -> Self {
        Self {
            store,
            query: ProductQuery::default(),
        }
    }

    pub fn with_query(mut self, query: ProductQuery) -> Self {
        self.query = query;
        self
    }
}

#[async_trait]
impl<C: CatalogApi + 'static> Resolve for ProductsResolver<C> {
    async fn resolve(&self, _target: &RouteTarget) -> Result<Value, ResolveError> {
        let page = self.store.get_products(&self.query).await?;
        to_resolved(&page)
    }
}

/// Resolves the dashboard payload.
pub struct DashboardResolver<C> {
    store: Arc<CatalogStore<C>>,
}

impl<C> DashboardResolver<C> {
    pub fn new(store: Arc<CatalogStore<C>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<C: CatalogApi + 'static> Resolve for DashboardResolver<C> {
    async fn resolve(&self, _target: &RouteTarget) -> Result<Value, ResolveError> {
        let data = self.store.get_dashboard().await?;
        Ok(data)
    }
}

/// Resolves a single product from the cached collection, by the `id`
/// path parameter.
///
/// A failure here means the requested product is not available: the error
/// is logged and the navigation is aborted with a redirect to the parent
/// of the target URL (`/admin/contracts/x` -> `/admin/contracts`).
pub struct ProductResolver<C> {
    store: Arc<CatalogStore<C>>,
}

impl<C> ProductResolver<C> {
    pub fn new(store: Arc<CatalogStore<C>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<C: CatalogApi + 'static> Resolve for ProductResolver<C> {
    async fn resolve(&self, target: &RouteTarget) -> Result<Value, ResolveError> {
        let id = target.param("id").unwrap_or_default();
        match self.store.product_by_id(id).await {
            Ok(product) => to_resolved(&product),
            Err(err) => {
                error!(error = %err, url = %target.url, "product resolve failed");
                Err(ResolveError::Redirect {
                    to: parent_url(&target.url),
                    source: err,
                })
            }
        }
    }
}
