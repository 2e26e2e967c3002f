mod catalog;
mod client;
mod resolve;
mod store;

pub use catalog::{
    Brand, Category, Pagination, Product, ProductPage, ProductQuery, SortOrder, Tag, Vendor,
};
pub use client::{CatalogApi, ClientError, HttpCatalogApi, InMemoryCatalogApi};
pub use resolve::{
    parent_url, BrandsResolver, CategoriesResolver, DashboardResolver, ProductResolver,
    ProductsResolver, Resolve, ResolveError, ResolverSet, RouteTarget, TagsResolver,
    VendorsResolver,
};
pub use store::{CatalogStore, SnapshotCell, StoreError};

// Re-export the watch channel types that snapshot subscribers hold on to
pub use tokio::sync::watch;
