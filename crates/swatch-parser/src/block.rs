//! Parsed documentation blocks and pages.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::frontmatter::HeaderError;

/// One annotated doc comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    /// Unique block name (heading anchor)
    pub name: String,

    /// Display title
    pub title: String,

    /// Category label; the page title comes from the first block's category
    pub category: String,

    /// Parent block name, for nested blocks
    pub parent: Option<String>,

    /// Markdown extracted from the comment body
    pub markdown: String,

    /// Heading level (1 for top-level blocks)
    pub level: u8,
}

/// One output page: the blocks of a single category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    /// Blocks in render order
    pub blocks: Vec<Block>,

    /// Concatenated markdown of all blocks
    pub md: String,
}

impl Page {
    /// Page title: the category of the first block, or empty.
    pub fn title(&self) -> &str {
        page_title(&self.blocks)
    }
}

/// Title for a page made of `blocks`: the first block's category, or empty.
pub fn page_title(blocks: &[Block]) -> &str {
    blocks.first().map_or("", |b| b.category.as_str())
}

/// Parser output.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocs {
    /// Pages keyed by output file name (e.g. `base_css.html`)
    pub pages: BTreeMap<String, Page>,

    /// Distinct categories for navigation
    pub categories: Vec<String>,
}

/// Something that turns a source tree into pages.
pub trait DocParser {
    /// Parse every documented file under `input_dir`.
    fn parse(&self, input_dir: &Path, index: Option<&str>) -> Result<ParsedDocs, ParseError>;
}

/// Output file name for a category.
pub fn page_file_name(category: &str) -> String {
    format!("{}.html", category.replace(' ', "_").to_lowercase())
}

/// Errors that can occur when parsing a source tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid doc block in {}: {source}", path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: HeaderError,
    },
}
