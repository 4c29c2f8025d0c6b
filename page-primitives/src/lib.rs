//! Core shared types for the pagekit page-loading runtime.

#![warn(missing_docs, clippy::pedantic)]

mod data;
mod error;
mod ids;
mod route;

/// Result object produced by page loaders.
pub use data::PageData;
/// Error type and result alias shared across the runtime.
pub use error::{Error, Result};
/// Unique identifier minted per load invocation.
pub use ids::RequestId;
/// Route paths and route specifications.
pub use route::{RoutePath, RouteSpec};
