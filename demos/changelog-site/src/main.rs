//! Minimal host wiring the changelog loader into a pagekit kernel.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use page_kernel::{LoadScheduler, PageKernel, RouteTable};
use page_loaders::{CHANGELOG_KEY, CHANGELOG_ROUTE, ChangelogConfig, ChangelogLoader};
use page_primitives::RoutePath;
use tracing::info;

/// Serve the changelog page once: prerender (unless disabled), dispatch a
/// request, and print the loaded text.
#[derive(Debug, Parser)]
#[command(name = "changelog-site")]
struct Args {
    /// Path of the changelog document to serve.
    #[arg(long, default_value = page_loaders::DEFAULT_SOURCE)]
    changelog: PathBuf,

    /// Load the page fresh on request instead of prerendering it.
    #[arg(long)]
    no_prerender: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();

    let routes = Arc::new(RouteTable::new());
    routes
        .register(Arc::new(ChangelogLoader::new(ChangelogConfig::new(
            &args.changelog,
        ))))
        .context("failed to register changelog route")?;

    let kernel = PageKernel::new(routes, LoadScheduler::default());

    if !args.no_prerender {
        let count = kernel.prerender().await.context("prerender pass failed")?;
        info!(routes = count, "prerender pass complete");
    }

    let route = RoutePath::new(CHANGELOG_ROUTE)?;
    let data = kernel
        .handle_request(&route)
        .await
        .with_context(|| format!("request for `{route}` failed"))?;

    info!(route = %route, fields = data.len(), "page data loaded");
    println!("{}", data.get_str(CHANGELOG_KEY).unwrap_or_default());

    Ok(())
}
