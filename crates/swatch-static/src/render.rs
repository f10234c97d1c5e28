//! Page rendering: markdown body wrapped in header and footer templates.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use swatch_markdown::{MarkdownRenderer, RenderError};
use swatch_parser::{page_title, Block, Page};

use crate::templates::PageTemplates;
use crate::warning::TemplateRole;

/// Variables available to header and footer templates.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext<'a> {
    /// Category of the page's first block, or empty
    pub title: &'a str,
    /// Output file name (e.g. `base_css.html`)
    pub file_name: &'a str,
    /// The page's blocks in order
    pub blocks: &'a [Block],
    /// All categories, for navigation
    pub categories: &'a [String],
}

impl<'a> PageContext<'a> {
    pub fn new(file_name: &'a str, blocks: &'a [Block], categories: &'a [String]) -> Self {
        Self {
            title: page_title(blocks),
            file_name,
            blocks,
            categories,
        }
    }

    pub fn for_page(file_name: &'a str, page: &'a Page, categories: &'a [String]) -> Self {
        Self::new(file_name, &page.blocks, categories)
    }
}

/// Errors that can occur when writing a single page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("markdown: {0}")]
    Markdown(#[from] RenderError),

    #[error("template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("write: {0}")]
    Io(#[from] io::Error),
}

/// Render one page and write it to `output_dir/file_name`.
///
/// Everything is rendered before the file is opened, so a failing template or
/// renderer leaves no partial file behind. The file is closed on return.
pub fn write_page(
    output_dir: &Path,
    file_name: &str,
    page: &Page,
    categories: &[String],
    renderer: &dyn MarkdownRenderer,
    templates: &PageTemplates,
) -> Result<(), PageError> {
    let context = PageContext::for_page(file_name, page, categories);

    let header = templates.render(TemplateRole::Header, &context)?;
    let body = renderer.render(&page.md)?;
    let footer = templates.render(TemplateRole::Footer, &context)?;

    let mut out = BufWriter::new(File::create(output_dir.join(file_name))?);
    if let Some(header) = header {
        out.write_all(header.as_bytes())?;
    }
    out.write_all(body.as_bytes())?;
    if let Some(footer) = footer {
        out.write_all(footer.as_bytes())?;
    }
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use swatch_markdown::PulldownRenderer;
    use tempfile::tempdir;

    struct FailingRenderer;

    impl MarkdownRenderer for FailingRenderer {
        fn name(&self) -> &str {
            "FailingRenderer"
        }

        fn render(&self, _markdown: &str) -> Result<String, RenderError> {
            Err(RenderError::Render("boom".to_string()))
        }
    }

    fn page() -> Page {
        Page {
            blocks: vec![Block {
                name: "button".to_string(),
                title: "Buttons".to_string(),
                category: "Base CSS".to_string(),
                parent: None,
                markdown: "| a | b |\n|---|---|\n| 1 | 2 |".to_string(),
                level: 1,
            }],
            md: "# Buttons\n\n| a | b |\n|---|---|\n| 1 | 2 |\n".to_string(),
        }
    }

    #[test]
    fn title_is_first_block_category() {
        let page = page();
        let context = PageContext::for_page("base_css.html", &page, &[]);

        assert_eq!(context.title, "Base CSS");
        assert_eq!(PageContext::new("x.html", &[], &[]).title, "");
    }

    #[test]
    fn wraps_body_in_header_and_footer() {
        let temp = tempdir().unwrap();
        let mut templates = PageTemplates::empty();
        templates
            .add(TemplateRole::Header, "<title>{{ title }}</title>\n".to_string())
            .unwrap();
        templates
            .add(TemplateRole::Footer, "<!-- {{ file_name }} -->".to_string())
            .unwrap();

        write_page(
            temp.path(),
            "base_css.html",
            &page(),
            &["Base CSS".to_string()],
            &PulldownRenderer::new(),
            &templates,
        )
        .unwrap();

        let html = fs::read_to_string(temp.path().join("base_css.html")).unwrap();
        assert!(html.starts_with("<title>Base CSS</title>\n<h1>Buttons</h1>"));
        assert!(html.contains("<table>"));
        assert!(html.ends_with("<!-- base_css.html -->"));
    }

    #[test]
    fn writes_body_alone_without_templates() {
        let temp = tempdir().unwrap();

        write_page(
            temp.path(),
            "plain.html",
            &page(),
            &[],
            &PulldownRenderer::new(),
            &PageTemplates::empty(),
        )
        .unwrap();

        let html = fs::read_to_string(temp.path().join("plain.html")).unwrap();
        assert!(html.starts_with("<h1>Buttons</h1>"));
    }

    #[test]
    fn renderer_failure_leaves_no_file() {
        let temp = tempdir().unwrap();

        let err = write_page(
            temp.path(),
            "broken.html",
            &page(),
            &[],
            &FailingRenderer,
            &PageTemplates::empty(),
        )
        .unwrap_err();

        assert!(matches!(err, PageError::Markdown(_)));
        assert!(!temp.path().join("broken.html").exists());
    }
}
