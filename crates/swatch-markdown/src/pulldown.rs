//! Built-in renderers backed by pulldown-cmark.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::traits::{MarkdownRenderer, RenderError};

/// Markdown extensions enabled for every built-in renderer.
///
/// Fenced code blocks are part of CommonMark and always on.
fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// The default renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct PulldownRenderer;

impl PulldownRenderer {
    /// Registry name of the default renderer.
    pub const NAME: &'static str = "MarkdownRenderer";

    pub fn new() -> Self {
        Self
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(markdown, options());

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);

        Ok(html_output)
    }
}

/// Renderer that gives every heading without an explicit id a slug anchor.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchoredRenderer;

impl AnchoredRenderer {
    /// Registry name of the anchored renderer.
    pub const NAME: &'static str = "AnchoredRenderer";

    pub fn new() -> Self {
        Self
    }
}

impl MarkdownRenderer for AnchoredRenderer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let mut events: Vec<Event> = Parser::new_ext(markdown, options()).collect();

        // (index of the heading start event, accumulated heading text)
        let mut open_heading: Option<(usize, String)> = None;
        let mut anchors: Vec<(usize, String)> = Vec::new();

        for (i, event) in events.iter().enumerate() {
            match event {
                Event::Start(Tag::Heading { id: None, .. }) => {
                    open_heading = Some((i, String::new()));
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, ref mut title)) = open_heading {
                        title.push_str(text);
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((start, title)) = open_heading.take() {
                        anchors.push((start, slugify(&title)));
                    }
                }
                _ => {}
            }
        }

        for (start, slug) in anchors {
            if slug.is_empty() {
                continue;
            }
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                *id = Some(CowStr::from(slug));
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
