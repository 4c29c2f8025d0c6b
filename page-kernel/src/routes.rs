//! Runtime registry mapping route paths to loader implementations.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use page_primitives::{RoutePath, RouteSpec};
use thiserror::Error;

use crate::loader::PageLoader;

/// Result alias for route table operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors surfaced by the route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// A loader is already registered under the route path.
    #[error("route `{path}` is already registered")]
    Duplicate {
        /// The conflicting route path.
        path: RoutePath,
    },

    /// No loader is registered under the requested path.
    #[error("no loader registered for route `{path}`")]
    Unknown {
        /// The unresolved route path.
        path: RoutePath,
    },
}

/// Registry that stores page loaders keyed by route path.
#[derive(Default)]
pub struct RouteTable {
    inner: RwLock<HashMap<RoutePath, Arc<dyn PageLoader>>>,
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("route table poisoned");
        let paths: Vec<_> = inner.keys().cloned().collect();
        f.debug_struct("RouteTable")
            .field("registered", &paths)
            .finish()
    }
}

impl RouteTable {
    /// Creates an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loader under the path declared in its [`RouteSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Duplicate`] if a loader already occupies the
    /// route.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock has been poisoned by a previous panic.
    pub fn register(&self, loader: Arc<dyn PageLoader>) -> RouteResult<()> {
        let path = loader.route().path().clone();
        let mut inner = self.inner.write().expect("route table poisoned");
        if inner.contains_key(&path) {
            return Err(RouteError::Duplicate { path });
        }
        inner.insert(path, loader);
        Ok(())
    }

    /// Resolves the loader mounted at `path`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock has been poisoned by a previous panic.
    #[must_use]
    pub fn get(&self, path: &RoutePath) -> Option<Arc<dyn PageLoader>> {
        self.inner
            .read()
            .expect("route table poisoned")
            .get(path)
            .cloned()
    }

    /// Returns the specs of every registered route.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock has been poisoned by a previous panic.
    #[must_use]
    pub fn routes(&self) -> Vec<RouteSpec> {
        self.inner
            .read()
            .expect("route table poisoned")
            .values()
            .map(|loader| loader.route().clone())
            .collect()
    }

    /// Returns the number of registered routes.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock has been poisoned by a previous panic.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().expect("route table poisoned").len()
    }

    /// Returns `true` when no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use page_primitives::PageData;

    use crate::loader::{LoadContext, LoadResult};

    struct NullLoader {
        spec: RouteSpec,
    }

    impl NullLoader {
        fn at(path: &str) -> Arc<Self> {
            Arc::new(Self {
                spec: RouteSpec::new(RoutePath::new(path).unwrap()),
            })
        }
    }

    #[async_trait]
    impl PageLoader for NullLoader {
        fn route(&self) -> &RouteSpec {
            &self.spec
        }

        async fn load(&self, _ctx: LoadContext) -> LoadResult {
            Ok(PageData::new())
        }
    }

    #[test]
    fn registers_and_resolves() {
        let table = RouteTable::new();
        table.register(NullLoader::at("/changelog")).unwrap();

        let path = RoutePath::new("/changelog").unwrap();
        assert!(table.get(&path).is_some());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn rejects_duplicate_routes() {
        let table = RouteTable::new();
        table.register(NullLoader::at("/changelog")).unwrap();

        let err = table
            .register(NullLoader::at("/changelog"))
            .expect_err("duplicate must fail");
        assert!(matches!(err, RouteError::Duplicate { .. }));
    }

    #[test]
    fn unknown_route_resolves_to_none() {
        let table = RouteTable::new();
        let path = RoutePath::new("/missing").unwrap();
        assert!(table.get(&path).is_none());
        assert!(table.is_empty());
    }
}
