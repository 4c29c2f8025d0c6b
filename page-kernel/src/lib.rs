//! Page load dispatch runtime.
//!
//! This crate provides the building blocks required by pagekit hosts: the
//! loader seam, a route table, an in-memory prerender cache, and a
//! lightweight scheduler backed by `tokio`.

#![warn(missing_docs, clippy::pedantic)]

mod loader;
mod prerender;
mod routes;
mod scheduler;

use std::sync::Arc;

use page_primitives::{PageData, RoutePath};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub use loader::{LoadContext, LoadError, LoadResult, PageLoader};
pub use prerender::PrerenderCache;
pub use routes::{RouteError, RouteResult, RouteTable};
pub use scheduler::{LoadScheduler, SchedulerConfig, SchedulerError, SchedulerResult};

/// Errors surfaced while dispatching a page request.
#[derive(Debug, Error)]
pub enum KernelError {
    /// The requested path did not resolve to a registered loader.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// The loader failed; its error is carried unchanged.
    #[error("load of `{route}` failed")]
    Load {
        /// Route whose loader failed.
        route: RoutePath,
        /// The loader's own error.
        #[source]
        source: LoadError,
    },
}

/// Result alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

/// Core runtime that wires the route table, prerender cache, and scheduler.
///
/// Requests for prerendered routes are answered from the snapshot captured by
/// [`PageKernel::prerender`]; every other request invokes its loader fresh,
/// with no state shared across invocations.
#[derive(Debug)]
pub struct PageKernel {
    routes: Arc<RouteTable>,
    cache: Arc<PrerenderCache>,
    scheduler: LoadScheduler,
}

impl PageKernel {
    /// Creates a new kernel over the provided route table and scheduler.
    #[must_use]
    pub fn new(routes: Arc<RouteTable>, scheduler: LoadScheduler) -> Self {
        Self {
            routes,
            cache: Arc::new(PrerenderCache::new()),
            scheduler,
        }
    }

    /// Returns the route table backing this kernel.
    #[must_use]
    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.routes
    }

    /// Returns the prerender cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<PrerenderCache> {
        &self.cache
    }

    /// Returns a reference to the underlying scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &LoadScheduler {
        &self.scheduler
    }

    /// Handles a page request immediately on the current task.
    ///
    /// The caller is suspended until the page data is available or an error
    /// occurs; dropping the future abandons the in-flight load.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::Route`] for unknown paths and
    /// [`KernelError::Load`] when the loader fails.
    pub async fn handle_request(&self, path: &RoutePath) -> KernelResult<Arc<PageData>> {
        dispatch_request(&self.routes, &self.cache, path).await
    }

    /// Enqueues a page request for asynchronous processing via the scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError`] when the scheduler has been closed.
    pub fn schedule_request(
        &self,
        path: RoutePath,
    ) -> SchedulerResult<JoinHandle<KernelResult<Arc<PageData>>>> {
        let routes = Arc::clone(&self.routes);
        let cache = Arc::clone(&self.cache);
        self.scheduler
            .spawn(async move { dispatch_request(&routes, &cache, &path).await })
    }

    /// Runs every loader whose spec sets the prerender flag exactly once and
    /// stores the results, returning the number of prerendered routes.
    ///
    /// Fails fast on the first loader error; routes prerendered before the
    /// failure remain cached.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::Load`] when a prerendering loader fails.
    pub async fn prerender(&self) -> KernelResult<usize> {
        let mut count = 0;
        for spec in self.routes.routes() {
            if !spec.prerender() {
                continue;
            }

            let path = spec.path().clone();
            let loader = self.routes.get(&path).ok_or_else(|| RouteError::Unknown {
                path: path.clone(),
            })?;

            let ctx = LoadContext::new(path.clone());
            let data = loader.load(ctx).await.map_err(|source| KernelError::Load {
                route: path.clone(),
                source,
            })?;

            self.cache.insert(path.clone(), data);
            info!(route = %path, "route prerendered");
            count += 1;
        }

        Ok(count)
    }
}

/// Resolves and executes a single page request.
///
/// # Errors
///
/// Returns [`KernelError::Route`] for unknown paths and [`KernelError::Load`]
/// when the loader fails.
async fn dispatch_request(
    routes: &RouteTable,
    cache: &PrerenderCache,
    path: &RoutePath,
) -> KernelResult<Arc<PageData>> {
    if let Some(snapshot) = cache.get(path) {
        debug!(route = %path, "serving prerendered snapshot");
        return Ok(snapshot);
    }

    let loader = routes.get(path).ok_or_else(|| RouteError::Unknown {
        path: path.clone(),
    })?;

    let ctx = LoadContext::new(path.clone());
    debug!(request_id = %ctx.request_id(), route = %path, "dispatching page load");

    let data = loader.load(ctx).await.map_err(|source| KernelError::Load {
        route: path.clone(),
        source,
    })?;

    Ok(Arc::new(data))
}
