//! Changelog page loader.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use page_kernel::{LoadContext, LoadError, LoadResult, PageLoader};
use page_primitives::{PageData, RoutePath, RouteSpec};
use tracing::debug;

/// Route under which the changelog page is mounted.
pub const CHANGELOG_ROUTE: &str = "/changelog";

/// Field name the changelog text is returned under.
pub const CHANGELOG_KEY: &str = "changelog";

/// Source path read on every invocation, relative to the working directory.
pub const DEFAULT_SOURCE: &str = "./CHANGELOG.md";

/// Configuration for the changelog loader.
#[derive(Clone, Debug)]
pub struct ChangelogConfig {
    source: PathBuf,
}

impl ChangelogConfig {
    /// Creates a configuration reading from the supplied path.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the source path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE)
    }
}

/// Loader that reads the changelog document and returns its raw text.
///
/// The loader performs one whole-file read per invocation with no caching,
/// retries, or writes, and returns the file contents unmodified under the
/// single field [`CHANGELOG_KEY`]. The route is declared with the prerender
/// flag set, so hosts normally run it once ahead of serving.
pub struct ChangelogLoader {
    config: ChangelogConfig,
    spec: RouteSpec,
}

impl ChangelogLoader {
    /// Creates a loader using the supplied configuration.
    ///
    /// # Panics
    ///
    /// Panics if the built-in route constant is invalid. The value is
    /// constant and verified during development.
    #[must_use]
    pub fn new(config: ChangelogConfig) -> Self {
        let path = RoutePath::new(CHANGELOG_ROUTE).expect("constant route is valid");
        Self {
            config,
            spec: RouteSpec::new(path).with_prerender(true),
        }
    }

    /// Returns the loader configuration.
    #[must_use]
    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }
}

impl Default for ChangelogLoader {
    fn default() -> Self {
        Self::new(ChangelogConfig::default())
    }
}

#[async_trait]
impl PageLoader for ChangelogLoader {
    fn route(&self) -> &RouteSpec {
        &self.spec
    }

    /// Reads the changelog source and returns `{ changelog: <text> }`.
    ///
    /// Decoding is strict: content that is not valid UTF-8 fails with
    /// [`LoadError::Decode`] rather than being replaced lossily. The read is
    /// a single call into the filesystem; concurrent modification yields
    /// whatever byte sequence the platform delivers for that one read.
    async fn load(&self, ctx: LoadContext) -> LoadResult {
        let path = self.config.source();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| map_read_error(path, err))?;
        let text = String::from_utf8(bytes).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            request_id = %ctx.request_id(),
            route = %ctx.route(),
            bytes = text.len(),
            "changelog source read"
        );

        Ok(PageData::from_text(CHANGELOG_KEY, text).expect("constant key is valid"))
    }
}

fn map_read_error(path: &Path, err: std::io::Error) -> LoadError {
    let path = path.to_path_buf();
    match err.kind() {
        ErrorKind::NotFound => LoadError::NotFound { path },
        ErrorKind::PermissionDenied => LoadError::PermissionDenied { path },
        _ => LoadError::Io { path, source: err },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn loader_in(dir: &TempDir) -> ChangelogLoader {
        ChangelogLoader::new(ChangelogConfig::new(dir.path().join("CHANGELOG.md")))
    }

    fn ctx() -> LoadContext {
        LoadContext::new(RoutePath::new(CHANGELOG_ROUTE).unwrap())
    }

    #[test]
    fn declares_prerendered_changelog_route() {
        let loader = ChangelogLoader::default();
        assert_eq!(loader.route().path().as_str(), "/changelog");
        assert!(loader.route().prerender());
        assert_eq!(loader.config().source(), Path::new("./CHANGELOG.md"));
    }

    #[tokio::test]
    async fn returns_file_contents_verbatim() {
        let dir = TempDir::new().unwrap();
        let body = "# Changelog\n\n## 1.0.0\n- initial release\n";
        fs::write(dir.path().join("CHANGELOG.md"), body).unwrap();

        let data = loader_in(&dir).load(ctx()).await.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.get_str(CHANGELOG_KEY), Some(body));
    }

    #[tokio::test]
    async fn empty_file_yields_empty_string() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CHANGELOG.md"), "").unwrap();

        let data = loader_in(&dir).load(ctx()).await.unwrap();
        assert_eq!(data.get_str(CHANGELOG_KEY), Some(""));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();

        let err = loader_in(&dir).load(ctx()).await.expect_err("must fail");
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[tokio::test]
    async fn invalid_utf8_fails_decode() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CHANGELOG.md"), [0x23, 0x20, 0xff, 0xfe]).unwrap();

        let err = loader_in(&dir).load(ctx()).await.expect_err("must fail");
        assert!(matches!(err, LoadError::Decode { .. }));
    }

    #[tokio::test]
    async fn reload_observes_modified_file() {
        let dir = TempDir::new().unwrap();
        let loader = loader_in(&dir);
        let path = dir.path().join("CHANGELOG.md");

        fs::write(&path, "old").unwrap();
        let first = loader.load(ctx()).await.unwrap();
        let again = loader.load(ctx()).await.unwrap();
        assert_eq!(first, again);

        fs::write(&path, "new").unwrap();
        let second = loader.load(ctx()).await.unwrap();
        assert_eq!(second.get_str(CHANGELOG_KEY), Some("new"));
    }
}
