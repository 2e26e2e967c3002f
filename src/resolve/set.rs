//! ResolverSet - the named resolvers one route declares.
//!
//! A route's view is only instantiated once every named resolver has
//! produced its value; the resolved values are handed to the view under
//! those names. Resolvers run in declaration order and the first failure
//! aborts the whole navigation.

use std::collections::HashMap;

use serde_json::Value;

use super::{Resolve, ResolveError, RouteTarget};

/// An ordered name -> resolver registry for one route.
#[derive(Default)]
pub struct ResolverSet {
    resolvers: Vec<(String, Box<dyn Resolve>)>,
}

impl ResolverSet {
    pub fn new() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Register a named resolver.
    ///
    /// Uses builder pattern - returns `self` for chaining.
    pub fn resolver(mut self, name: &str, resolver: impl Resolve + 'static) -> Self {
        self.resolvers.push((name.to_string(), Box::new(resolver)));
        self
    }

    /// The registered names, in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Run every resolver against the target, in declaration order.
    ///
    /// Returns the named value map the route injects into its view. The
    /// first failure aborts immediately - later resolvers are not run and
    /// the navigation is abandoned (with a redirect instruction when the
    /// failing resolver issued one).
    pub async fn resolve_all(
        &self,
        target: &RouteTarget,
    ) -> Result<HashMap<String, Value>, ResolveError> {
        let mut resolved = HashMap::with_capacity(self.resolvers.len());
        for (name, resolver) in &self.resolvers {
            let value = resolver.resolve(target).await?;
            resolved.insert(name.clone(), value);
        }
        Ok(resolved)
    }
}
