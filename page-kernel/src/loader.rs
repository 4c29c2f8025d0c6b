//! The loader seam between the hosting runtime and page implementations.

use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;
use page_primitives::{PageData, RequestId, RoutePath, RouteSpec};
use thiserror::Error;

/// Context provided to a loader for a single invocation.
///
/// The context carries correlation data only; the load operation itself takes
/// no parameters and must not branch on anything in here beyond logging.
#[derive(Debug, Clone)]
pub struct LoadContext {
    request_id: RequestId,
    route: RoutePath,
    received_at: Instant,
}

impl LoadContext {
    /// Constructs a context for the supplied route with a fresh request id.
    #[must_use]
    pub fn new(route: RoutePath) -> Self {
        Self {
            request_id: RequestId::random(),
            route,
            received_at: Instant::now(),
        }
    }

    /// Overrides the request identifier, e.g. to adopt one minted upstream.
    #[must_use]
    pub const fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the route being loaded.
    #[must_use]
    pub const fn route(&self) -> &RoutePath {
        &self.route
    }

    /// Returns the time the request was accepted.
    #[must_use]
    pub fn received_at(&self) -> Instant {
        self.received_at
    }
}

/// Errors a loader can surface to the host.
///
/// None of these are recovered locally; the host propagates them unchanged to
/// the embedding application, which owns the user-visible error path.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The page source file does not exist.
    #[error("page source not found: {}", .path.display())]
    NotFound {
        /// Path that was read.
        path: PathBuf,
    },

    /// The page source file exists but is not readable.
    #[error("page source not readable: {}", .path.display())]
    PermissionDenied {
        /// Path that was read.
        path: PathBuf,
    },

    /// The page source contains byte sequences that are not valid UTF-8.
    #[error("page source at {} is not valid UTF-8", .path.display())]
    Decode {
        /// Path that was read.
        path: PathBuf,
        /// Decoding failure reported by the standard library.
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Any other filesystem failure during the read.
    #[error("failed to read page source at {}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Custom loader error with human-readable context.
    #[error("loader error: {0}")]
    Custom(String),
}

impl LoadError {
    /// Creates a custom error variant from a string-like value.
    #[must_use]
    pub fn custom(reason: impl Into<String>) -> Self {
        Self::Custom(reason.into())
    }
}

/// Result alias for loader operations.
pub type LoadResult<T = PageData> = Result<T, LoadError>;

/// Trait implemented by server-side page loaders.
///
/// A loader is invoked by the host with no arguments at a host-determined
/// time: once ahead of serving when its [`RouteSpec`] sets the prerender
/// flag, or once per incoming request otherwise. Each invocation produces
/// exactly one [`PageData`] with no state shared across invocations.
/// Dropping the returned future abandons the load; no partial result is
/// observable.
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Returns the route this loader serves and its prerender flag.
    fn route(&self) -> &RouteSpec;

    /// Produces the page data for one request or build.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when the page source cannot be read or
    /// decoded. Implementations must not substitute fallback content.
    async fn load(&self, ctx: LoadContext) -> LoadResult;
}
