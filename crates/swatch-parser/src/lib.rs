//! Doc comment parser for swatch style guides.
//!
//! This crate scans source files for documentation comments, parses their
//! YAML headers, and groups the blocks into pages by category.

pub mod block;
pub mod frontmatter;
pub mod parser;

pub use block::{page_file_name, page_title, Block, DocParser, Page, ParseError, ParsedDocs};
pub use frontmatter::{extract_header, BlockHeader, HeaderError};
pub use parser::{CommentParser, DEFAULT_EXTENSIONS};
