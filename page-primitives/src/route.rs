//! Route paths and route specifications.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_PATH_LEN: usize = 128;

/// Path under which a page loader is mounted, e.g. `/changelog`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePath(String);

impl RoutePath {
    /// Creates a new route path after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRoutePath`] if the supplied path is empty, does
    /// not start with `/`, is too long, or contains unsupported characters.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        validate_path(&path)?;
        Ok(Self(path))
    }

    /// Returns the route path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<RoutePath> for String {
    fn from(value: RoutePath) -> Self {
        value.0
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::InvalidRoutePath {
            path: String::new(),
            reason: "path cannot be empty".into(),
        });
    }

    if !path.starts_with('/') {
        return Err(Error::InvalidRoutePath {
            path: path.into(),
            reason: "path must start with `/`".into(),
        });
    }

    if path.len() > MAX_PATH_LEN {
        return Err(Error::InvalidRoutePath {
            path: path.into(),
            reason: format!("path length must be <= {MAX_PATH_LEN}"),
        });
    }

    if !path
        .chars()
        .all(|c| matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '/' | '-' | '_' | '.'))
    {
        return Err(Error::InvalidRoutePath {
            path: path.into(),
            reason: "path must contain alphanumeric, slash, dash, underscore, or dot".into(),
        });
    }

    Ok(())
}

/// Describes where a loader is mounted and when the host should invoke it.
///
/// The prerender flag never changes what the loader does, only whether the
/// host runs it once ahead of serving and caches the output, or runs it fresh
/// for every incoming request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    path: RoutePath,
    prerender: bool,
}

impl RouteSpec {
    /// Creates a spec for the supplied path with prerendering disabled.
    #[must_use]
    pub const fn new(path: RoutePath) -> Self {
        Self {
            path,
            prerender: false,
        }
    }

    /// Sets whether the host should execute this load ahead of serving.
    #[must_use]
    pub const fn with_prerender(mut self, prerender: bool) -> Self {
        self.prerender = prerender;
        self
    }

    /// Returns the route path.
    #[must_use]
    pub const fn path(&self) -> &RoutePath {
        &self.path
    }

    /// Returns `true` when the host should prerender this route.
    #[must_use]
    pub const fn prerender(&self) -> bool {
        self.prerender
    }
}
