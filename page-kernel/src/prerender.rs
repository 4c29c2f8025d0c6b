//! In-memory cache of page data captured by the prerender pass.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use page_primitives::{PageData, RoutePath};

/// Snapshot store for routes whose loaders ran ahead of serving.
///
/// Entries are written once by the prerender pass and served unchanged for
/// every subsequent request; later edits to a page source are not observed
/// until the host prerenders again.
#[derive(Default)]
pub struct PrerenderCache {
    inner: RwLock<HashMap<RoutePath, Arc<PageData>>>,
}

impl std::fmt::Debug for PrerenderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("prerender cache poisoned");
        let paths: Vec<_> = inner.keys().cloned().collect();
        f.debug_struct("PrerenderCache")
            .field("cached", &paths)
            .finish()
    }
}

impl PrerenderCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the snapshot for a route, replacing any previous one.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock has been poisoned by a previous panic.
    pub fn insert(&self, path: RoutePath, data: PageData) {
        self.inner
            .write()
            .expect("prerender cache poisoned")
            .insert(path, Arc::new(data));
    }

    /// Returns the snapshot for `path`, if one was captured.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock has been poisoned by a previous panic.
    #[must_use]
    pub fn get(&self, path: &RoutePath) -> Option<Arc<PageData>> {
        self.inner
            .read()
            .expect("prerender cache poisoned")
            .get(path)
            .cloned()
    }

    /// Returns the number of cached routes.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock has been poisoned by a previous panic.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().expect("prerender cache poisoned").len()
    }

    /// Returns `true` when no snapshots are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_serves_snapshots() {
        let cache = PrerenderCache::new();
        let path = RoutePath::new("/changelog").unwrap();
        let data = PageData::from_text("changelog", "v1").unwrap();

        assert!(cache.get(&path).is_none());
        cache.insert(path.clone(), data.clone());

        let snapshot = cache.get(&path).expect("cached");
        assert_eq!(*snapshot, data);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_replaces_previous_snapshot() {
        let cache = PrerenderCache::new();
        let path = RoutePath::new("/changelog").unwrap();
        cache.insert(path.clone(), PageData::from_text("changelog", "old").unwrap());
        cache.insert(path.clone(), PageData::from_text("changelog", "new").unwrap());

        let snapshot = cache.get(&path).expect("cached");
        assert_eq!(snapshot.get_str("changelog"), Some("new"));
        assert_eq!(cache.len(), 1);
    }
}
