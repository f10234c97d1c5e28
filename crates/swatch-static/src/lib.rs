//! Static style guide builder.
//!
//! Loads and validates the build configuration, renders every parsed page
//! through the configured markdown renderer and header/footer templates, and
//! copies dependencies and documentation assets into the destination.

pub mod assets;
pub mod builder;
pub mod config;
pub mod render;
pub mod templates;
pub mod validate;
pub mod warning;

pub use builder::{BuildError, BuildResult, StaticBuilder};
pub use config::{Config, ConfigError, ConfigOptions, ResolvedPaths, DEFAULT_CONFIG_FILE};
pub use render::{PageContext, PageError};
pub use templates::PageTemplates;
pub use validate::{Validation, ValidationError};
pub use warning::{BuildWarning, TemplateRole};
