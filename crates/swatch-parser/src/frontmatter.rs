//! Doc block header extraction and parsing.

use serde::Deserialize;

/// Parsed YAML header of a doc comment block.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct BlockHeader {
    /// Unique block name, used as the heading anchor and parent reference
    #[serde(default)]
    pub name: Option<String>,

    /// Display title (defaults to the name)
    #[serde(default)]
    pub title: Option<String>,

    /// Category the block is grouped under; one page per category
    #[serde(default)]
    pub category: Option<String>,

    /// Name of the block this one is nested under
    #[serde(default)]
    pub parent: Option<String>,
}

/// Extract the header from a doc block body.
///
/// Returns the parsed header and the markdown remaining after the header block.
/// The `name` field is required.
pub fn extract_header(body: &str) -> Result<(BlockHeader, &str), HeaderError> {
    let trimmed = body.trim_start();

    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Err(HeaderError::Missing);
    };

    // Find the closing ---
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(HeaderError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let header: BlockHeader = serde_yaml::from_str(yaml_content)
        .map_err(|e| HeaderError::InvalidYaml(e.to_string()))?;

    if header.name.as_deref().map_or(true, str::is_empty) {
        return Err(HeaderError::MissingField("name"));
    }

    Ok((header, remaining.trim()))
}

/// Errors that can occur when parsing a block header.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("Doc block has no header - expected an opening ---")]
    Missing,

    #[error("Unclosed header block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in header: {0}")]
    InvalidYaml(String),

    #[error("Header is missing required field `{0}`")]
    MissingField(&'static str),
}
