//! Entity stores - the last-known server state, one cell per collection.
//!
//! A store holds whatever the most recent successful fetch or mutation
//! produced and exposes it through [`SnapshotCell`] streams that replay the
//! latest value to every new subscriber. Nothing here re-fetches on its
//! own; a cached snapshot can silently diverge from the server between
//! navigations, and that is the contract.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_store::{CatalogStore, HttpCatalogApi, ProductQuery};
//!
//! let store = CatalogStore::new(HttpCatalogApi::new(base_url));
//! let mut products = store.products();
//! store.get_products(&ProductQuery::default()).await?;
//! let snapshot = products.borrow().clone();
//! ```

mod catalog;
mod cell;

use std::fmt;

use crate::client::ClientError;

pub use catalog::CatalogStore;
pub use cell::SnapshotCell;

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The HTTP boundary failed; propagated unchanged.
    Client(ClientError),
    /// The requested id is absent from the cached collection. Raised
    /// locally - no request was issued.
    NotFound { entity: &'static str, id: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Client(e) => write!(f, "catalog api error: {}", e),
            StoreError::NotFound { entity, id } => {
                write!(f, "no {} with id {} in the cached collection", entity, id)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Client(e) => Some(e),
            StoreError::NotFound { .. } => None,
        }
    }
}

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        StoreError::Client(err)
    }
}
