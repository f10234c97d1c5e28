//! Trait definitions for markdown renderers.

/// Errors that can occur while rendering markdown.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Render error: {0}")]
    Render(String),
}

/// A markdown-to-HTML renderer.
///
/// Implementations must support at least fenced code blocks and tables.
pub trait MarkdownRenderer: Send + Sync {
    /// Renderer identifier (e.g., "MarkdownRenderer")
    fn name(&self) -> &str;

    /// Render a markdown document to an HTML fragment.
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

impl std::fmt::Debug for dyn MarkdownRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MarkdownRenderer").field(&self.name()).finish()
    }
}
