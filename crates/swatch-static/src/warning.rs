//! Non-fatal build conditions.

use std::fmt;
use std::path::PathBuf;

/// Header or footer template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateRole {
    Header,
    Footer,
}

impl TemplateRole {
    pub const ALL: [TemplateRole; 2] = [TemplateRole::Header, TemplateRole::Footer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }

    /// Current file name (`_header.html`).
    pub fn file_name(&self) -> String {
        format!("_{}.html", self.as_str())
    }

    /// Deprecated file name (`header.html`).
    pub fn legacy_file_name(&self) -> String {
        format!("{}.html", self.as_str())
    }
}

impl fmt::Display for TemplateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A condition reported during a build that does not stop it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildWarning {
    #[error("No _{0}.html found in documentation assets. Without this your css/header will not be included on the generated pages.")]
    MissingTemplate(TemplateRole),

    #[error("Could not compile {}: {reason}", path.display())]
    InvalidTemplate { path: PathBuf, reason: String },

    #[error("Could not generate {index}.html, there was no content generated for the category {index}.")]
    MissingIndex { index: String },

    #[error("Could not find documentation assets at {}", .0.display())]
    MissingAssetsDir(PathBuf),

    #[error("Could not write page {file_name}: {reason}")]
    PageRender { file_name: String, reason: String },

    #[error("Could not copy dependency: {} ({reason})", path.display())]
    DependencyCopy { path: PathBuf, reason: String },

    #[error("Could not copy documentation asset: {} ({reason})", path.display())]
    AssetCopy { path: PathBuf, reason: String },
}

/// Collects warnings, logging each as it is recorded.
#[derive(Debug, Default)]
pub struct Warnings(Vec<BuildWarning>);

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: BuildWarning) {
        tracing::warn!("{}", warning);
        self.0.push(warning);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<BuildWarning> {
        self.0
    }
}
