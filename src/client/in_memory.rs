//! InMemoryCatalogApi - in-process fake of the REST contract.
//!
//! Serves the same contract as the real backend for tests and development,
//! including the server-side listing behavior the stores rely on: search,
//! then sort, then paginate, with recomputed paging metadata.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{CatalogApi, ClientError};
use crate::catalog::{
    Brand, Category, Pagination, Product, ProductPage, ProductQuery, SortOrder, Tag, Vendor,
};

#[derive(Default)]
struct Collections {
    brands: Vec<Brand>,
    categories: Vec<Category>,
    vendors: Vec<Vendor>,
    tags: Vec<Tag>,
    products: Vec<Product>,
    dashboard: Option<Value>,
}

/// In-memory implementation of [`CatalogApi`]. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryCatalogApi {
    state: Arc<RwLock<Collections>>,
    next_id: Arc<AtomicU64>,
}

impl Default for InMemoryCatalogApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalogApi {
    /// Create an empty fake backend.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(Collections::default())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Seed the brand collection.
    pub fn seed_brands(&self, brands: Vec<Brand>) {
        self.write().brands = brands;
    }

    /// Seed the category collection.
    pub fn seed_categories(&self, categories: Vec<Category>) {
        self.write().categories = categories;
    }

    /// Seed the vendor collection.
    pub fn seed_vendors(&self, vendors: Vec<Vendor>) {
        self.write().vendors = vendors;
    }

    /// Seed the tag collection.
    pub fn seed_tags(&self, tags: Vec<Tag>) {
        self.write().tags = tags;
    }

    /// Seed the product collection.
    pub fn seed_products(&self, products: Vec<Product>) {
        self.write().products = products;
    }

    /// Seed the dashboard payload.
    pub fn seed_dashboard(&self, dashboard: Value) {
        self.write().dashboard = Some(dashboard);
    }

    fn mint_id(&self, prefix: &str) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", prefix, id)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Collections> {
        // Lock poisoning only happens if a panic escaped a holder; the
        // holders below never panic while holding it.
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Collections> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn compare(a: &Product, b: &Product, sort: &str) -> std::cmp::Ordering {
        match sort {
            "price" => a.price.total_cmp(&b.price),
            "sku" => {
                let a = a.sku.as_deref().unwrap_or_default().to_lowercase();
                let b = b.sku.as_deref().unwrap_or_default().to_lowercase();
                a.cmp(&b)
            }
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }

    /// Search, sort, and paginate the way the real backend does.
    fn list_products(&self, query: &ProductQuery) -> ProductPage {
        let state = self.read();

        let needle = query.search.to_lowercase();
        let mut matched: Vec<Product> = state
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        drop(state);

        matched.sort_by(|a, b| {
            let ordering = Self::compare(a, b, &query.sort);
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let length = matched.len();
        let size = query.size.max(1);
        let begin = (query.page * size).min(length);
        let end = (size * (query.page + 1)).min(length);
        let last_page = (length.div_ceil(size)).max(1);

        ProductPage {
            pagination: Pagination {
                length,
                size,
                page: query.page,
                last_page,
                start_index: begin,
                end_index: end.saturating_sub(1),
            },
            products: matched[begin..end].to_vec(),
        }
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalogApi {
    async fn brands(&self) -> Result<Vec<Brand>, ClientError> {
        Ok(self.read().brands.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        Ok(self.read().categories.clone())
    }

    async fn vendors(&self) -> Result<Vec<Vendor>, ClientError> {
        Ok(self.read().vendors.clone())
    }

    async fn tags(&self) -> Result<Vec<Tag>, ClientError> {
        Ok(self.read().tags.clone())
    }

    async fn products(&self, query: &ProductQuery) -> Result<ProductPage, ClientError> {
        Ok(self.list_products(query))
    }

    async fn create_product(&self) -> Result<Product, ClientError> {
        let draft = Product {
            id: self.mint_id("product"),
            name: "A New Product".to_string(),
            ..Product::default()
        };
        self.write().products.insert(0, draft.clone());
        Ok(draft)
    }

    async fn update_product(&self, id: &str, product: &Product) -> Result<Product, ClientError> {
        let mut state = self.write();
        let slot = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ClientError::Status {
                status: 404,
                path: "contracts/product".to_string(),
            })?;
        *slot = Product {
            id: id.to_string(),
            ..product.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_product(&self, id: &str) -> Result<bool, ClientError> {
        let mut state = self.write();
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(state.products.len() < before)
    }

    async fn create_tag(&self, tag: &Tag) -> Result<Tag, ClientError> {
        let minted = Tag {
            id: Some(self.mint_id("tag")),
            title: tag.title.clone(),
        };
        self.write().tags.push(minted.clone());
        Ok(minted)
    }

    async fn update_tag(&self, id: &str, tag: &Tag) -> Result<Tag, ClientError> {
        let mut state = self.write();
        let slot = state
            .tags
            .iter_mut()
            .find(|t| t.id.as_deref() == Some(id))
            .ok_or_else(|| ClientError::Status {
                status: 404,
                path: "contracts/tag".to_string(),
            })?;
        *slot = Tag {
            id: Some(id.to_string()),
            title: tag.title.clone(),
        };
        Ok(slot.clone())
    }

    async fn delete_tag(&self, id: &str) -> Result<bool, ClientError> {
        let mut state = self.write();
        let before = state.tags.len();
        state.tags.retain(|t| t.id.as_deref() != Some(id));
        let deleted = state.tags.len() < before;

        // The backend also drops the tag from its own product records.
        if deleted {
            for product in &mut state.products {
                product.tags.retain(|t| t != id);
            }
        }
        Ok(deleted)
    }

    async fn dashboard(&self) -> Result<Value, ClientError> {
        Ok(self.read().dashboard.clone().unwrap_or_else(|| json!({})))
    }
}
