//! Renderer registry for resolving custom markdown renderers.
//!
//! Renderers are registered by type name at startup. A configured renderer
//! source path is mapped to a type name by convention (`my_renderer.rs` ->
//! `MyRenderer`) and looked up among the registered entries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::pulldown::{AnchoredRenderer, PulldownRenderer};
use crate::traits::MarkdownRenderer;

/// Source extension a custom renderer path must carry.
pub const RENDERER_EXTENSION: &str = "rs";

/// Constructor for a registered renderer.
pub type RendererConstructor = fn() -> Box<dyn MarkdownRenderer>;

/// A registry of markdown renderers.
#[derive(Debug, Default)]
pub struct RendererRegistry {
    /// Constructors by type name
    renderers: HashMap<String, RendererConstructor>,
}

impl RendererRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in renderers registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(PulldownRenderer::NAME, || Box::new(PulldownRenderer::new()));
        registry.register(AnchoredRenderer::NAME, || Box::new(AnchoredRenderer::new()));
        registry
    }

    /// Register a renderer constructor under a type name.
    ///
    /// Registering the same name twice replaces the earlier entry.
    pub fn register(&mut self, name: impl Into<String>, constructor: RendererConstructor) {
        self.renderers.insert(name.into(), constructor);
    }

    /// Check if a renderer is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Get all registered renderer names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The default renderer.
    pub fn default_renderer(&self) -> Box<dyn MarkdownRenderer> {
        match self.renderers.get(PulldownRenderer::NAME) {
            Some(constructor) => constructor(),
            None => Box::new(PulldownRenderer::new()),
        }
    }

    /// Resolve the renderer for an optional custom renderer path.
    pub fn resolve(
        &self,
        custom: Option<&Path>,
    ) -> Result<Box<dyn MarkdownRenderer>, RendererLoadError> {
        let Some(path) = custom else {
            return Ok(self.default_renderer());
        };

        let has_extension = path
            .extension()
            .is_some_and(|ext| ext == RENDERER_EXTENSION);
        if !has_extension || !path.is_file() {
            return Err(RendererLoadError::Unloadable(path.to_path_buf()));
        }

        let name = expected_type_name(path);
        let constructor = self
            .renderers
            .get(&name)
            .ok_or_else(|| RendererLoadError::NotRegistered {
                name: name.clone(),
                path: path.to_path_buf(),
            })?;

        tracing::info!("Custom markdown renderer {} loaded.", name);

        Ok(constructor())
    }
}

/// Derive the renderer type name from a source path.
///
/// The file stem is split on underscores and each segment capitalized:
/// `renderers/my_renderer.rs` becomes `MyRenderer`.
pub fn expected_type_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

    stem.split('_').map(capitalize).collect()
}

/// Capitalize the first letter and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Errors that can occur when resolving a renderer.
#[derive(Debug, thiserror::Error)]
pub enum RendererLoadError {
    #[error("Could not load {}.", .0.display())]
    Unloadable(PathBuf),

    #[error("Class {name} not found in {}.", path.display())]
    NotRegistered { name: String, path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RenderError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    struct ShoutRenderer;

    impl MarkdownRenderer for ShoutRenderer {
        fn name(&self) -> &str {
            "ShoutRenderer"
        }

        fn render(&self, markdown: &str) -> Result<String, RenderError> {
            Ok(markdown.to_uppercase())
        }
    }

    #[test]
    fn returns_default_without_custom_path() {
        let registry = RendererRegistry::with_builtins();

        let renderer = registry.resolve(None).unwrap();

        assert_eq!(renderer.name(), PulldownRenderer::NAME);
    }

    #[test]
    fn resolves_registered_custom_renderer() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("shout_renderer.rs");
        fs::write(&path, "// shout").unwrap();

        let mut registry = RendererRegistry::with_builtins();
        registry.register("ShoutRenderer", || Box::new(ShoutRenderer));

        let renderer = registry.resolve(Some(&path)).unwrap();

        assert_eq!(renderer.name(), "ShoutRenderer");
        assert_eq!(renderer.render("hi").unwrap(), "HI");
    }

    #[test]
    fn resolves_builtin_by_file_convention() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("anchored_renderer.rs");
        fs::write(&path, "").unwrap();

        let registry = RendererRegistry::with_builtins();
        let renderer = registry.resolve(Some(&path)).unwrap();

        assert_eq!(renderer.name(), AnchoredRenderer::NAME);
    }

    #[test]
    fn errors_when_type_not_registered() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("my_renderer.rs");
        fs::write(&path, "").unwrap();

        let err = RendererRegistry::with_builtins()
            .resolve(Some(&path))
            .unwrap_err();

        assert!(matches!(err, RendererLoadError::NotRegistered { ref name, .. } if name == "MyRenderer"));
        let message = err.to_string();
        assert!(message.contains("MyRenderer"));
        assert!(message.contains(&path.display().to_string()));
    }

    #[test]
    fn errors_without_source_extension() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("foo");
        fs::write(&path, "").unwrap();

        let err = RendererRegistry::with_builtins()
            .resolve(Some(&path))
            .unwrap_err();

        assert!(matches!(err, RendererLoadError::Unloadable(_)));
        assert!(err.to_string().contains("Could not load"));
    }

    #[test]
    fn errors_when_file_missing() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing_renderer.rs");

        let err = RendererRegistry::with_builtins()
            .resolve(Some(&path))
            .unwrap_err();

        assert!(matches!(err, RendererLoadError::Unloadable(_)));
    }

    #[test]
    fn derives_type_names() {
        assert_eq!(expected_type_name(Path::new("my_renderer.rs")), "MyRenderer");
        assert_eq!(expected_type_name(Path::new("lib/valid_renderer.rs")), "ValidRenderer");
        assert_eq!(expected_type_name(Path::new("markdown.rs")), "Markdown");
    }

    #[test]
    fn lists_registered_names() {
        let registry = RendererRegistry::with_builtins();

        assert_eq!(registry.names(), vec!["AnchoredRenderer", "MarkdownRenderer"]);
        assert!(registry.contains("MarkdownRenderer"));
    }
}
