//! Static style guide builder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use swatch_parser::{CommentParser, DocParser, ParseError};

use crate::assets::{copy_assets, copy_dependencies};
use crate::config::Config;
use crate::render::write_page;
use crate::templates::PageTemplates;
use crate::validate::ValidationError;
use crate::warning::{BuildWarning, Warnings};

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages written
    pub pages: usize,

    /// Number of pages that could not be written
    pub failed_pages: usize,

    /// Number of dependency directories copied
    pub dependencies: usize,

    /// Number of documentation asset entries copied
    pub assets: usize,

    /// Non-fatal conditions, in the order they occurred
    pub warnings: Vec<BuildWarning>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that stop a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{0}")]
    Invalid(ValidationError),

    #[error("Failed to create destination directory {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse source files: {0}")]
    Parse(#[from] ParseError),
}

/// Static style guide builder.
pub struct StaticBuilder {
    config: Config,
    parser: Box<dyn DocParser>,
}

impl StaticBuilder {
    /// Create a builder using the default comment parser.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parser: Box::new(CommentParser::new()),
        }
    }

    /// Replace the source parser.
    pub fn with_parser(mut self, parser: impl DocParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the style guide.
    ///
    /// Only an invalid config, an uncreatable destination, or a parse failure
    /// stop the build. Everything else is recorded as a warning.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let validation = self.config.validate();
        if let Some(error) = validation.first_error() {
            return Err(BuildError::Invalid(error.clone()));
        }
        let paths = validation.paths;
        let Some(input_dir) = paths.input_dir else {
            return Err(BuildError::Invalid(ValidationError::MissingSource));
        };

        let mut warnings = Warnings::new();
        let templates = PageTemplates::resolve(paths.doc_assets_dir.as_deref(), &mut warnings);

        let output_dir = match paths.output_dir {
            Some(dir) => dir,
            None => self.create_destination()?,
        };

        let docs = self.parser.parse(&input_dir, self.config.index())?;

        if let Some(index) = self.config.index() {
            if !docs.pages.contains_key(&format!("{index}.html")) {
                warnings.push(BuildWarning::MissingIndex {
                    index: index.to_string(),
                });
            }
        }

        if paths.doc_assets_dir.is_none() {
            let configured = self.config.documentation_assets().unwrap_or_default();
            warnings.push(BuildWarning::MissingAssetsDir(configured));
        }

        let mut pages = 0;
        let mut failed_pages = 0;
        for (file_name, page) in &docs.pages {
            match write_page(
                &output_dir,
                file_name,
                page,
                &docs.categories,
                self.config.renderer(),
                &templates,
            ) {
                Ok(()) => pages += 1,
                Err(e) => {
                    failed_pages += 1;
                    warnings.push(BuildWarning::PageRender {
                        file_name: file_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let dependencies = copy_dependencies(
            self.config.dependencies(),
            self.config.base_path(),
            &output_dir,
            &mut warnings,
        );

        let assets = match paths.doc_assets_dir.as_deref() {
            Some(assets_dir) => copy_assets(assets_dir, &output_dir, &mut warnings),
            None => 0,
        };

        let duration = start.elapsed();

        tracing::info!(
            "Wrote {} pages to {} in {}ms",
            pages,
            output_dir.display(),
            duration.as_millis()
        );

        Ok(BuildResult {
            pages,
            failed_pages,
            dependencies,
            assets,
            warnings: warnings.into_vec(),
            duration_ms: duration.as_millis() as u64,
            output_dir,
        })
    }

    /// Create the destination directory and return its canonical path.
    fn create_destination(&self) -> Result<PathBuf, BuildError> {
        let path = self
            .config
            .destination()
            .ok_or(BuildError::Invalid(ValidationError::MissingDestination))?;

        fs::create_dir_all(&path)
            .and_then(|()| fs::canonicalize(&path))
            .map_err(|source| BuildError::Destination { path, source })
    }
}
