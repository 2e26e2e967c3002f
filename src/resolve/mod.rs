//! Resolve-before-render hooks - gate a navigation on its data.
//!
//! A [`Resolve`] implementation is invoked by whatever routing glue the
//! application uses, before the destination view renders. It fetches
//! through a store and either produces the resolved value, propagates the
//! failure (navigation aborted), or aborts with a redirect instruction.
//! The hook knows nothing about any particular router; [`RouteTarget`] is
//! the whole contract.
//!
//! There is no retry and no timeout: a hung HTTP boundary hangs the
//! navigation.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_store::{ProductResolver, ResolverSet, RouteTarget};
//!
//! let resolvers = ResolverSet::new()
//!     .resolver("brands", BrandsResolver::new(store.clone()))
//!     .resolver("products", ProductsResolver::new(store.clone()));
//!
//! let target = RouteTarget::new("/admin/contracts");
//! let data = resolvers.resolve_all(&target).await?;
//! ```

mod resolvers;
mod set;

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::store::StoreError;

pub use resolvers::{
    BrandsResolver, CategoriesResolver, DashboardResolver, ProductResolver, ProductsResolver,
    TagsResolver, VendorsResolver,
};
pub use set::ResolverSet;

/// The navigation target a resolver runs for: the full URL being
/// navigated to plus its named path parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTarget {
    pub url: String,
    params: HashMap<String, String>,
}

impl RouteTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: HashMap::new(),
        }
    }

    /// Attach a named path parameter (builder style).
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Look up a named path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Drop the last path segment: `/admin/contracts/x` -> `/admin/contracts`.
pub fn parent_url(url: &str) -> String {
    let mut segments: Vec<&str> = url.split('/').collect();
    segments.pop();
    segments.join("/")
}

/// Error type for resolve hooks. Either way the navigation is abandoned;
/// `Redirect` additionally tells the router glue where to go instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The fetch failed; the error propagates unchanged.
    Fetch(StoreError),
    /// The fetch failed and the router should navigate to `to` instead.
    Redirect { to: String, source: StoreError },
}

impl ResolveError {
    /// The redirect instruction, if this failure carries one.
    pub fn redirect(&self) -> Option<&str> {
        match self {
            ResolveError::Fetch(_) => None,
            ResolveError::Redirect { to, .. } => Some(to),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Fetch(e) => write!(f, "resolve failed: {}", e),
            ResolveError::Redirect { to, source } => {
                write!(f, "resolve failed, redirecting to {}: {}", to, source)
            }
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Fetch(e) => Some(e),
            ResolveError::Redirect { source, .. } => Some(source),
        }
    }
}

impl From<StoreError> for ResolveError {
    fn from(err: StoreError) -> Self {
        ResolveError::Fetch(err)
    }
}

/// A resolve-before-render hook: from a navigation target to a resolved
/// JSON value, a propagated failure, or a redirect instruction.
///
/// Values are JSON so one route can declare a heterogeneous map of named
/// resolvers (see [`ResolverSet`]).
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, target: &RouteTarget) -> Result<Value, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_url_drops_the_last_segment() {
        assert_eq!(parent_url("/admin/contracts/x"), "/admin/contracts");
        assert_eq!(parent_url("/admin/contracts"), "/admin");
    }

    #[test]
    fn parent_url_of_a_single_segment_is_empty() {
        assert_eq!(parent_url("/contracts"), "");
        assert_eq!(parent_url("contracts"), "");
    }

    #[test]
    fn route_target_params() {
        let target = RouteTarget::new("/admin/contracts/p-1").with_param("id", "p-1");
        assert_eq!(target.param("id"), Some("p-1"));
        assert_eq!(target.param("missing"), None);
    }
}
