//! Pluggable markdown renderers for swatch style guides.
//!
//! This crate defines the renderer contract used by the page builder, the
//! built-in pulldown-cmark renderers, and the registry that maps a configured
//! renderer source path to a registered implementation.

pub mod pulldown;
pub mod registry;
pub mod traits;

pub use pulldown::{slugify, AnchoredRenderer, PulldownRenderer};
pub use registry::{expected_type_name, RendererConstructor, RendererLoadError, RendererRegistry};
pub use traits::{MarkdownRenderer, RenderError};
