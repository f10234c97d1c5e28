//! Doc comment parser.
//!
//! Scans a source tree for `/*doc ... */` comments, each holding a YAML header
//! and a markdown body, and groups the resulting blocks into one page per
//! category.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::block::{page_file_name, Block, DocParser, Page, ParseError, ParsedDocs};
use crate::frontmatter::{extract_header, BlockHeader};

/// File extensions scanned by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl", "js"];

/// Deepest heading level emitted for nested blocks.
const MAX_LEVEL: u8 = 6;

fn doc_comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*doc(\s.*?)\*/").expect("doc comment pattern is valid"))
}

/// A block as found in the source, before grouping.
#[derive(Debug, Clone)]
struct RawBlock {
    header: BlockHeader,
    markdown: String,
    source_path: PathBuf,
}

impl RawBlock {
    fn name(&self) -> &str {
        self.header.name.as_deref().unwrap_or_default()
    }
}

/// Default [`DocParser`] reading `/*doc */` comments.
#[derive(Debug, Clone)]
pub struct CommentParser {
    extensions: Vec<String>,
}

impl Default for CommentParser {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl CommentParser {
    /// Create a parser scanning the default extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser scanning only the given extensions.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Find all scannable files under the input directory, in path order.
    fn discover_files(&self, input_dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                self.extensions.iter().any(|allowed| allowed == ext)
            })
            .collect();

        files.sort();
        files
    }
}

impl DocParser for CommentParser {
    fn parse(&self, input_dir: &Path, index: Option<&str>) -> Result<ParsedDocs, ParseError> {
        let mut raw_blocks = Vec::new();

        for path in self.discover_files(input_dir) {
            let content = fs::read_to_string(&path).map_err(|source| ParseError::Read {
                path: path.clone(),
                source,
            })?;
            raw_blocks.extend(extract_blocks(&path, &content)?);
        }

        tracing::debug!(
            "Found {} doc blocks in {}",
            raw_blocks.len(),
            input_dir.display()
        );

        Ok(group_blocks(raw_blocks, index))
    }
}

/// Extract every doc comment from one file.
fn extract_blocks(path: &Path, content: &str) -> Result<Vec<RawBlock>, ParseError> {
    doc_comment_regex()
        .captures_iter(content)
        .map(|caps| -> Result<RawBlock, ParseError> {
            let body = caps.get(1).map_or("", |m| m.as_str());
            let (header, markdown) = extract_header(body).map_err(|source| ParseError::Header {
                path: path.to_path_buf(),
                source,
            })?;

            Ok(RawBlock {
                header,
                markdown: markdown.to_string(),
                source_path: path.to_path_buf(),
            })
        })
        .collect()
}

/// Nest child blocks under their parents and group the result by category.
fn group_blocks(raw_blocks: Vec<RawBlock>, index: Option<&str>) -> ParsedDocs {
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for (i, block) in raw_blocks.iter().enumerate() {
        if by_name.contains_key(block.name()) {
            tracing::warn!(
                "Duplicate doc block name '{}' in {}, keeping the first",
                block.name(),
                block.source_path.display()
            );
            continue;
        }
        by_name.insert(block.name(), i);
    }

    let mut roots = Vec::new();
    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();

    for (i, block) in raw_blocks.iter().enumerate() {
        match block.header.parent.as_deref() {
            None => roots.push(i),
            Some(parent) => match by_name.get(parent) {
                Some(&p) if p != i => children.entry(p).or_default().push(i),
                _ => {
                    tracing::warn!(
                        "Parent '{}' of doc block '{}' not found, treating it as top-level",
                        parent,
                        block.name()
                    );
                    roots.push(i);
                }
            },
        }
    }

    let mut docs = ParsedDocs::default();
    let mut visited = vec![false; raw_blocks.len()];

    for root in roots {
        let Some(category) = raw_blocks[root].header.category.clone() else {
            tracing::debug!(
                "Skipping doc block '{}' without a category",
                raw_blocks[root].name()
            );
            mark_subtree(root, &children, &mut visited);
            continue;
        };

        let file_name = page_file_name(&category);
        if !docs.pages.contains_key(&file_name) {
            docs.categories.push(category.clone());
        }
        let page = docs.pages.entry(file_name).or_default();

        let mut stack = vec![(root, 1u8)];
        while let Some((i, level)) = stack.pop() {
            if visited[i] {
                continue;
            }
            visited[i] = true;

            let block = to_block(&raw_blocks[i], &category, level);
            append_block(page, block);

            if let Some(kids) = children.get(&i) {
                let next = (level + 1).min(MAX_LEVEL);
                stack.extend(kids.iter().rev().map(|&k| (k, next)));
            }
        }
    }

    for (i, seen) in visited.iter().enumerate() {
        if !seen {
            tracing::warn!(
                "Doc block '{}' in {} is not reachable from a top-level block",
                raw_blocks[i].name(),
                raw_blocks[i].source_path.display()
            );
        }
    }

    if let Some(index) = index {
        let index_file = format!("{index}.html");
        if let Some(pos) = docs
            .categories
            .iter()
            .position(|c| page_file_name(c) == index_file)
        {
            let category = docs.categories.remove(pos);
            docs.categories.insert(0, category);
        }
    }

    docs
}

/// Mark a block and all of its descendants as handled.
fn mark_subtree(root: usize, children: &HashMap<usize, Vec<usize>>, visited: &mut [bool]) {
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        if let Some(kids) = children.get(&i) {
            stack.extend(kids.iter().copied());
        }
    }
}

fn to_block(raw: &RawBlock, category: &str, level: u8) -> Block {
    let name = raw.name().to_string();
    let title = raw.header.title.clone().unwrap_or_else(|| name.clone());

    Block {
        name,
        title,
        category: category.to_string(),
        parent: raw.header.parent.clone(),
        markdown: raw.markdown.clone(),
        level,
    }
}

fn append_block(page: &mut Page, block: Block) {
    page.md.push_str(&format!(
        "\n\n<h{level} id=\"{name}\">{title}</h{level}>\n\n{markdown}",
        level = block.level,
        name = escape_html(&block.name),
        title = escape_html(&block.title),
        markdown = block.markdown,
    ));
    page.blocks.push(block);
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const BUTTONS: &str = r#"
/*doc
---
title: Buttons
name: button
category: Base CSS
---

Use `.btn` for buttons.
*/
.btn { padding: 4px; }

/*doc
---
title: Button Sizes
name: button_sizes
parent: button
---

`.btn-lg` and `.btn-sm`.
*/
"#;

    const TYPOGRAPHY: &str = r#"
/*doc
---
title: Headings
name: headings
category: Typography
---

# h1
*/
"#;

    #[test]
    fn groups_blocks_into_pages() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("buttons.scss"), BUTTONS).unwrap();
        fs::write(temp.path().join("type.css"), TYPOGRAPHY).unwrap();
        fs::write(temp.path().join("notes.txt"), TYPOGRAPHY).unwrap();

        let docs = CommentParser::new().parse(temp.path(), None).unwrap();

        assert_eq!(
            docs.pages.keys().cloned().collect::<Vec<_>>(),
            vec!["base_css.html".to_string(), "typography.html".to_string()]
        );
        assert_eq!(docs.categories, vec!["Base CSS", "Typography"]);

        let page = &docs.pages["base_css.html"];
        assert_eq!(page.title(), "Base CSS");
        assert_eq!(page.blocks.len(), 2);
        assert_eq!(page.blocks[1].name, "button_sizes");
        assert_eq!(page.blocks[1].level, 2);
        assert_eq!(page.blocks[1].category, "Base CSS");
        assert!(page.md.contains("<h1 id=\"button\">Buttons</h1>"));
        assert!(page.md.contains("<h2 id=\"button_sizes\">Button Sizes</h2>"));
    }

    #[test]
    fn moves_index_category_first() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), BUTTONS).unwrap();
        fs::write(temp.path().join("b.css"), TYPOGRAPHY).unwrap();

        let docs = CommentParser::new()
            .parse(temp.path(), Some("typography"))
            .unwrap();

        assert_eq!(docs.categories, vec!["Typography", "Base CSS"]);
    }

    #[test]
    fn ignores_comments_that_only_start_with_doc() {
        let source = r#"
/*docked header styles */
.header { position: fixed; }

/*document this later*/

/*doc
---
name: header
category: Layout
---
Fixed header.
*/
"#;
        let blocks = extract_blocks(Path::new("layout.scss"), source).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name(), "header");
        assert_eq!(blocks[0].markdown, "Fixed header.");
    }

    #[test]
    fn treats_orphans_as_top_level() {
        let source = r#"
/*doc
---
name: lonely
category: Misc
parent: nobody
---
Alone.
*/
"#;
        let docs = group_blocks(extract_blocks(Path::new("x.css"), source).unwrap(), None);

        assert_eq!(docs.pages["misc.html"].blocks[0].level, 1);
    }

    #[test]
    fn skips_blocks_without_category() {
        let source = "/*doc\n---\nname: floating\n---\nNo home.\n*/";
        let docs = group_blocks(extract_blocks(Path::new("x.css"), source).unwrap(), None);

        assert!(docs.pages.is_empty());
        assert!(docs.categories.is_empty());
    }

    #[test]
    fn reports_invalid_headers_with_path() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("bad.css"), "/*doc\n---\nname: [oops\n---\n*/").unwrap();

        let err = CommentParser::new().parse(temp.path(), None).unwrap_err();

        assert!(matches!(err, ParseError::Header { .. }));
        assert!(err.to_string().contains("bad.css"));
    }

    #[test]
    fn respects_custom_extensions() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("type.css"), TYPOGRAPHY).unwrap();
        fs::write(temp.path().join("type.pcss"), BUTTONS).unwrap();

        let docs = CommentParser::with_extensions(["pcss"])
            .parse(temp.path(), None)
            .unwrap();

        assert_eq!(docs.categories, vec!["Base CSS"]);
    }
}
