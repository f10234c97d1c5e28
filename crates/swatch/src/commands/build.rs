//! Style guide build command.

use std::path::Path;

use anyhow::Result;
use swatch_markdown::RendererRegistry;
use swatch_static::{Config, StaticBuilder};

/// Run the build command.
pub fn run(config_path: &Path) -> Result<()> {
    tracing::info!("Building style guide from {}...", config_path.display());

    let registry = RendererRegistry::with_builtins();
    let config = Config::load(config_path, &registry)?;

    let result = StaticBuilder::new(config).build()?;

    if result.failed_pages > 0 {
        tracing::warn!("{} pages could not be written", result.failed_pages);
    }
    tracing::info!(
        "Copied {} dependencies and {} assets in {}ms",
        result.dependencies,
        result.assets,
        result.duration_ms
    );
    tracing::info!("Build completed. (-: ");

    Ok(())
}
