//! Build configuration loaded from `swatch_config.yml`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use swatch_markdown::{MarkdownRenderer, RendererLoadError, RendererRegistry};

/// Config file read when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "swatch_config.yml";

/// Options as written in the config file. Paths are relative to the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigOptions {
    /// Directory scanned for doc comments
    pub source: Option<PathBuf>,

    /// Output directory
    pub destination: Option<PathBuf>,

    /// Static assets and header/footer templates
    pub documentation_assets: Option<PathBuf>,

    /// Extra directories copied verbatim into the output
    pub dependencies: Vec<PathBuf>,

    /// Name of the page treated as the site root (`home` -> `home.html`)
    pub index: Option<String>,

    /// Source path of a custom markdown renderer
    pub custom_markdown: Option<PathBuf>,
}

/// A loaded configuration. Immutable once built.
#[derive(Debug)]
pub struct Config {
    options: ConfigOptions,
    base_path: PathBuf,
    renderer: Box<dyn MarkdownRenderer>,
}

/// Canonical forms of the configured directories.
///
/// Each is `None` when the directory does not exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPaths {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub doc_assets_dir: Option<PathBuf>,
}

impl Config {
    /// Load a config file, resolving the markdown renderer from `registry`.
    pub fn load(path: &Path, registry: &RendererRegistry) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Syntax(e.to_string()),
        })?;

        let options = parse_options(&content)?;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let base_path =
            fs::canonicalize(parent).map_err(|_| ConfigError::NotFound(path.to_path_buf()))?;

        let custom = options.custom_markdown.as_ref().map(|p| base_path.join(p));
        let renderer = registry.resolve(custom.as_deref())?;

        tracing::debug!("Loaded config from {}", path.display());

        Ok(Self::from_options(options, base_path, renderer))
    }

    /// Build a configuration directly from options.
    pub fn from_options(
        options: ConfigOptions,
        base_path: impl Into<PathBuf>,
        renderer: Box<dyn MarkdownRenderer>,
    ) -> Self {
        Self {
            options,
            base_path: base_path.into(),
            renderer,
        }
    }

    /// The options as written.
    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// Directory all relative paths resolve against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// The markdown renderer.
    pub fn renderer(&self) -> &dyn MarkdownRenderer {
        self.renderer.as_ref()
    }

    pub fn index(&self) -> Option<&str> {
        self.options.index.as_deref()
    }

    pub fn dependencies(&self) -> &[PathBuf] {
        &self.options.dependencies
    }

    /// Resolve a configured path against the base path.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }

    /// Absolute destination path, whether or not it exists yet.
    pub fn destination(&self) -> Option<PathBuf> {
        self.options.destination.as_deref().map(|p| self.resolve_path(p))
    }

    /// Absolute documentation assets path, whether or not it exists.
    pub fn documentation_assets(&self) -> Option<PathBuf> {
        self.options
            .documentation_assets
            .as_deref()
            .map(|p| self.resolve_path(p))
    }

    /// Resolve the configured directories that currently exist.
    pub fn resolve_dirs(&self) -> ResolvedPaths {
        let real_dir = |dir: &Option<PathBuf>| {
            dir.as_deref()
                .map(|p| self.resolve_path(p))
                .filter(|p| p.is_dir())
                .and_then(|p| fs::canonicalize(p).ok())
        };

        ResolvedPaths {
            input_dir: real_dir(&self.options.source),
            output_dir: real_dir(&self.options.destination),
            doc_assets_dir: real_dir(&self.options.documentation_assets),
        }
    }
}

/// Parse config file content, requiring a top-level mapping.
fn parse_options(content: &str) -> Result<ConfigOptions, ConfigError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Syntax(e.to_string()))?;

    if !value.is_mapping() {
        return Err(ConfigError::Syntax(
            "top level is not a mapping".to_string(),
        ));
    }

    serde_yaml::from_value(value).map_err(|e| ConfigError::Syntax(e.to_string()))
}

/// Errors that can occur when loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not load config file {}, try 'swatch init' to get started", .0.display())]
    NotFound(PathBuf),

    #[error("Could not load config file, check the syntax or try 'swatch init' to get started ({0})")]
    Syntax(String),

    #[error(transparent)]
    Renderer(#[from] RendererLoadError),
}
