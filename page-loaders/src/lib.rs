//! Loader implementations shipped with pagekit.

#![warn(missing_docs, clippy::pedantic)]

mod changelog;

/// The changelog page loader and its configuration.
pub use changelog::{CHANGELOG_KEY, CHANGELOG_ROUTE, ChangelogConfig, ChangelogLoader, DEFAULT_SOURCE};
