//! CatalogStore - read-through cache over the catalog REST boundary.
//!
//! One store owns the cells for every catalog collection plus the
//! selected-product cell. Generic over the API implementation so tests run
//! against [`InMemoryCatalogApi`](crate::InMemoryCatalogApi) and the
//! composition root injects [`HttpCatalogApi`](crate::HttpCatalogApi).
//!
//! Every mutation reads one synchronous snapshot of a cell, computes the
//! new list, and writes it back. There is no lock held across the HTTP
//! round trip and no sequencing token: two mutations in flight against the
//! same collection may interleave, and the later response wins.

use serde_json::Value;
use tracing::debug;

use super::cell::SnapshotCell;
use super::StoreError;
use crate::catalog::{Brand, Category, Pagination, Product, ProductPage, ProductQuery, Tag, Vendor};
use crate::client::CatalogApi;
use tokio::sync::watch;

/// Single source of truth for the last-fetched catalog state.
pub struct CatalogStore<C> {
    api: C,
    brands: SnapshotCell<Vec<Brand>>,
    categories: SnapshotCell<Vec<Category>>,
    vendors: SnapshotCell<Vec<Vendor>>,
    tags: SnapshotCell<Vec<Tag>>,
    products: SnapshotCell<Vec<Product>>,
    pagination: SnapshotCell<Pagination>,
    selected_product: SnapshotCell<Product>,
    dashboard: SnapshotCell<Value>,
}

impl<C: CatalogApi> CatalogStore<C> {
    /// Create a store over the given API. All cells start empty.
    pub fn new(api: C) -> Self {
        Self {
            api,
            brands: SnapshotCell::new(),
            categories: SnapshotCell::new(),
            vendors: SnapshotCell::new(),
            tags: SnapshotCell::new(),
            products: SnapshotCell::new(),
            pagination: SnapshotCell::new(),
            selected_product: SnapshotCell::new(),
            dashboard: SnapshotCell::new(),
        }
    }

    // -- snapshot streams ---------------------------------------------------

    /// Subscribe to the brand collection.
    pub fn brands(&self) -> watch::Receiver<Option<Vec<Brand>>> {
        self.brands.subscribe()
    }

    /// Subscribe to the category collection.
    pub fn categories(&self) -> watch::Receiver<Option<Vec<Category>>> {
        self.categories.subscribe()
    }

    /// Subscribe to the vendor collection.
    pub fn vendors(&self) -> watch::Receiver<Option<Vec<Vendor>>> {
        self.vendors.subscribe()
    }

    /// Subscribe to the tag collection.
    pub fn tags(&self) -> watch::Receiver<Option<Vec<Tag>>> {
        self.tags.subscribe()
    }

    /// Subscribe to the product collection.
    pub fn products(&self) -> watch::Receiver<Option<Vec<Product>>> {
        self.products.subscribe()
    }

    /// Subscribe to the product-listing paging metadata.
    pub fn pagination(&self) -> watch::Receiver<Option<Pagination>> {
        self.pagination.subscribe()
    }

    /// Subscribe to the currently selected product.
    pub fn selected_product(&self) -> watch::Receiver<Option<Product>> {
        self.selected_product.subscribe()
    }

    /// Subscribe to the dashboard payload.
    pub fn dashboard(&self) -> watch::Receiver<Option<Value>> {
        self.dashboard.subscribe()
    }

    // -- fetches ------------------------------------------------------------

    /// Fetch the brand collection and replace the cached snapshot.
    pub async fn get_brands(&self) -> Result<Vec<Brand>, StoreError> {
        let brands = self.api.brands().await?;
        debug!(count = brands.len(), "cached brands replaced");
        self.brands.set(brands.clone());
        Ok(brands)
    }

    /// Fetch the category collection and replace the cached snapshot.
    pub async fn get_categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = self.api.categories().await?;
        debug!(count = categories.len(), "cached categories replaced");
        self.categories.set(categories.clone());
        Ok(categories)
    }

    /// Fetch the vendor collection and replace the cached snapshot.
    pub async fn get_vendors(&self) -> Result<Vec<Vendor>, StoreError> {
        let vendors = self.api.vendors().await?;
        debug!(count = vendors.len(), "cached vendors replaced");
        self.vendors.set(vendors.clone());
        Ok(vendors)
    }

    /// Fetch the tag collection and replace the cached snapshot.
    pub async fn get_tags(&self) -> Result<Vec<Tag>, StoreError> {
        let tags = self.api.tags().await?;
        debug!(count = tags.len(), "cached tags replaced");
        self.tags.set(tags.clone());
        Ok(tags)
    }

    /// Fetch one page of products and replace both the paging metadata and
    /// the cached product collection. The server's ordering is trusted
    /// as-is; each cell is replaced whole, so subscribers never observe a
    /// partial update.
    pub async fn get_products(&self, query: &ProductQuery) -> Result<ProductPage, StoreError> {
        let page = self.api.products(query).await?;
        debug!(
            count = page.products.len(),
            page = page.pagination.page,
            "cached products replaced"
        );
        self.pagination.set(page.pagination.clone());
        self.products.set(page.products.clone());
        Ok(page)
    }

    /// Fetch the dashboard payload and replace the cached snapshot.
    pub async fn get_dashboard(&self) -> Result<Value, StoreError> {
        let data = self.api.dashboard().await?;
        self.dashboard.set(data.clone());
        Ok(data)
    }

    /// Look up a product in the *currently cached* collection. Never
    /// issues a request; an unfetched cache counts as empty.
    ///
    /// On a hit the selected-product cell is set to the item. On a miss
    /// the selection is cleared and the call fails `NotFound`.
    pub async fn product_by_id(&self, id: &str) -> Result<Product, StoreError> {
        let products = self.products.latest().unwrap_or_default();
        match products.into_iter().find(|p| p.id == id) {
            Some(product) => {
                self.selected_product.set(product.clone());
                Ok(product)
            }
            None => {
                self.selected_product.clear();
                Err(StoreError::NotFound {
                    entity: "product",
                    id: id.to_string(),
                })
            }
        }
    }

    // -- product mutations --------------------------------------------------

    /// Ask the server to mint a draft product, then prepend it to the
    /// cached collection.
    pub async fn create_product(&self) -> Result<Product, StoreError> {
        let created = self.api.create_product().await?;
        let mut products = self.products.latest().unwrap_or_default();
        products.insert(0, created.clone());
        self.products.set(products);
        Ok(created)
    }

    /// Update a product, replacing the cached entry in place. An id that
    /// is not in the cache leaves the list untouched. If the id matches
    /// the currently selected product, the selection is updated too;
    /// otherwise that cell never re-emits.
    pub async fn update_product(
        &self,
        id: &str,
        product: &Product,
    ) -> Result<Product, StoreError> {
        let updated = self.api.update_product(id, product).await?;

        let mut products = self.products.latest().unwrap_or_default();
        if let Some(index) = products.iter().position(|p| p.id == id) {
            products[index] = updated.clone();
        }
        self.products.set(products);

        let selected = self.selected_product.latest();
        if selected.as_ref().map(|p| p.id.as_str()) == Some(id) {
            self.selected_product.set(updated.clone());
        }

        Ok(updated)
    }

    /// Delete a product. The cached entry is removed regardless of the
    /// server's flag; the flag is returned as-is.
    pub async fn delete_product(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.api.delete_product(id).await?;

        let mut products = self.products.latest().unwrap_or_default();
        if let Some(index) = products.iter().position(|p| p.id == id) {
            products.remove(index);
        }
        self.products.set(products);

        Ok(deleted)
    }

    // -- tag mutations ------------------------------------------------------

    /// Create a tag, then prepend the server's tag to the cached
    /// collection.
    pub async fn create_tag(&self, tag: &Tag) -> Result<Tag, StoreError> {
        let created = self.api.create_tag(tag).await?;
        let mut tags = self.tags.latest().unwrap_or_default();
        tags.insert(0, created.clone());
        self.tags.set(tags);
        Ok(created)
    }

    /// Update a tag, replacing the cached entry in place. There is no
    /// selected-tag stream.
    pub async fn update_tag(&self, id: &str, tag: &Tag) -> Result<Tag, StoreError> {
        let updated = self.api.update_tag(id, tag).await?;

        let mut tags = self.tags.latest().unwrap_or_default();
        if let Some(index) = tags.iter().position(|t| t.id.as_deref() == Some(id)) {
            tags[index] = updated.clone();
        }
        self.tags.set(tags);

        Ok(updated)
    }

    /// Delete a tag. The cached tag is removed regardless of the server's
    /// flag; only when the server confirmed the delete is the tag id also
    /// swept out of every cached product's tag list, with the product
    /// cell re-emitted so subscribers observe the sweep.
    pub async fn delete_tag(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.api.delete_tag(id).await?;

        let mut tags = self.tags.latest().unwrap_or_default();
        if let Some(index) = tags.iter().position(|t| t.id.as_deref() == Some(id)) {
            tags.remove(index);
        }
        self.tags.set(tags);

        if deleted {
            if let Some(mut products) = self.products.latest() {
                let before: usize = products.iter().map(|p| p.tags.len()).sum();
                for product in &mut products {
                    product.tags.retain(|t| t != id);
                }
                let swept: usize =
                    before - products.iter().map(|p| p.tags.len()).sum::<usize>();
                if swept > 0 {
                    debug!(tag = id, swept, "dangling tag references swept");
                }
                self.products.set(products);
            }
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryCatalogApi;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            ..Product::default()
        }
    }

    fn store_with(products: Vec<Product>) -> CatalogStore<InMemoryCatalogApi> {
        let api = InMemoryCatalogApi::new();
        api.seed_products(products);
        CatalogStore::new(api)
    }

    #[tokio::test]
    async fn product_by_id_hits_the_cache_only() {
        let store = store_with(vec![product("a", "Alpha"), product("b", "Beta")]);
        store.get_products(&ProductQuery::default()).await.unwrap();

        let found = store.product_by_id("a").await.unwrap();
        assert_eq!(found.name, "Alpha");
        assert_eq!(
            store.selected_product().borrow().as_ref().map(|p| p.id.clone()),
            Some("a".to_string())
        );
    }

    #[tokio::test]
    async fn product_by_id_miss_clears_selection_and_fails() {
        let store = store_with(vec![product("a", "Alpha"), product("b", "Beta")]);
        store.get_products(&ProductQuery::default()).await.unwrap();
        store.product_by_id("a").await.unwrap();

        let err = store.product_by_id("z").await.unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                entity: "product",
                id: "z".to_string(),
            }
        );
        assert!(store.selected_product().borrow().is_none());
    }

    #[tokio::test]
    async fn product_by_id_on_cold_cache_is_not_found() {
        // No get_products first: the unfetched cache counts as empty and
        // no request goes out.
        let store = store_with(vec![product("a", "Alpha")]);
        let err = store.product_by_id("a").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_prepends_even_on_a_cold_cache() {
        let store = store_with(vec![]);
        let created = store.create_product().await.unwrap();

        let cached = store.products().borrow().clone().unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, created.id);

        // Reachable through the single-item lookup right away.
        let found = store.product_by_id(&created.id).await.unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn create_tag_prepends_even_on_a_cold_cache() {
        // No get_tags first: the unfetched cell counts as an empty list.
        let store = CatalogStore::new(InMemoryCatalogApi::new());
        let created = store
            .create_tag(&Tag {
                id: None,
                title: Some("sale".to_string()),
            })
            .await
            .unwrap();

        let cached = store.tags().borrow().clone().unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, created.id);
    }

    #[tokio::test]
    async fn update_of_uncached_id_leaves_the_list_alone() {
        let api = InMemoryCatalogApi::new();
        api.seed_products(vec![product("a", "Alpha"), product("b", "Beta")]);
        let store = CatalogStore::new(api);

        // Cache only page 1 of size 1: "b" is on the server but not cached.
        store
            .get_products(&ProductQuery {
                size: 1,
                ..ProductQuery::default()
            })
            .await
            .unwrap();

        let changed = product("b", "Beta Prime");
        store.update_product("b", &changed).await.unwrap();

        let cached = store.products().borrow().clone().unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "a");
    }

    #[tokio::test]
    async fn update_refreshes_selection_only_when_it_matches() {
        let store = store_with(vec![product("a", "Alpha"), product("b", "Beta")]);
        store.get_products(&ProductQuery::default()).await.unwrap();
        store.product_by_id("a").await.unwrap();

        let mut selected_rx = store.selected_product();
        selected_rx.borrow_and_update();

        // Updating "b" while "a" is selected: the selection never re-emits.
        let changed = product("b", "Beta Prime");
        store.update_product("b", &changed).await.unwrap();
        assert!(!selected_rx.has_changed().unwrap());

        // Updating "a" does.
        let changed = product("a", "Alpha Prime");
        store.update_product("a", &changed).await.unwrap();
        assert!(selected_rx.has_changed().unwrap());
        assert_eq!(
            selected_rx.borrow().as_ref().map(|p| p.name.clone()),
            Some("Alpha Prime".to_string())
        );
    }
}
