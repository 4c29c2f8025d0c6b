//! Pagekit runtime SDK facade.
//!
//! Depend on this crate via `cargo add pagekit`. It bundles the runtime
//! crates behind feature flags so hosts can enable or disable components as
//! needed for their sites.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use page_primitives as primitives;

/// Page load dispatch runtime (enabled by `kernel` feature).
#[cfg(feature = "kernel")]
pub use page_kernel as kernel;

/// Bundled loader implementations (enabled by `loaders` feature).
#[cfg(feature = "loaders")]
pub use page_loaders as loaders;
