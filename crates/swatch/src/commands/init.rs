//! Initialize a style guide in the current directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use swatch_static::DEFAULT_CONFIG_FILE;

/// Run the init command.
pub fn run() -> Result<()> {
    tracing::info!("Initializing swatch...");

    let created = scaffold(Path::new("."))?;

    if created.is_empty() {
        tracing::warn!(
            "Cowardly refusing to overwrite existing {}",
            DEFAULT_CONFIG_FILE
        );
        return Ok(());
    }

    for path in &created {
        tracing::info!("Created {}", path.display());
    }
    tracing::info!("Run 'swatch' to build your style guide.");

    Ok(())
}

/// Write the default config and documentation assets into `root`.
///
/// Returns the created paths, relative to `root`. Nothing is written if a
/// config file already exists.
fn scaffold(root: &Path) -> Result<Vec<PathBuf>> {
    let config_path = root.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        return Ok(Vec::new());
    }

    let assets_dir = root.join("doc_assets");
    fs::create_dir_all(&assets_dir).context("Failed to create doc_assets directory")?;

    let files = [
        (PathBuf::from(DEFAULT_CONFIG_FILE), DEFAULT_CONFIG),
        (PathBuf::from("doc_assets/_header.html"), DEFAULT_HEADER),
        (PathBuf::from("doc_assets/_footer.html"), DEFAULT_FOOTER),
    ];

    let mut created = vec![PathBuf::from("doc_assets/")];
    for (relative, content) in files {
        let path = root.join(&relative);
        if path.exists() {
            continue;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", relative.display()))?;
        created.push(relative);
    }

    Ok(created)
}

const DEFAULT_CONFIG: &str = r#"# Swatch configuration
# Paths are relative to this file.

# Directory scanned for /*doc ... */ comments
source: ./sass

# Output directory for the generated style guide
destination: ./docs

# Static assets and the _header.html / _footer.html templates.
# Entries starting with an underscore are not copied to the output.
documentation_assets: ./doc_assets

# Extra directories copied verbatim into the output
# dependencies:
#   - ./build

# Category page to treat as the site root, e.g. "base_css" for base_css.html
# index: base_css

# Source of a custom markdown renderer registered with swatch
# custom_markdown: ./lib/my_renderer.rs
"#;

const DEFAULT_HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - Style Guide</title>
</head>
<body>
  {# Variables: title, file_name, blocks, categories. Output is HTML-escaped;
      use the safe filter for raw markup, e.g. {{ blocks[0].markdown | safe }} #}
  <nav class="categories">
    <ul>
    {% for category in categories %}
      <li{% if category == title %} class="active"{% endif %}>
        <a href="{{ category | lower | replace(" ", "_") }}.html">{{ category }}</a>
      </li>
    {% endfor %}
    </ul>
  </nav>
  <main class="content">
"#;

const DEFAULT_FOOTER: &str = r#"  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_config_and_templates() {
        let temp = tempdir().unwrap();

        let created = scaffold(temp.path()).unwrap();

        assert_eq!(created.len(), 4);
        assert!(temp.path().join(DEFAULT_CONFIG_FILE).is_file());
        assert!(temp.path().join("doc_assets/_header.html").is_file());
        assert!(temp.path().join("doc_assets/_footer.html").is_file());
    }

    #[test]
    fn refuses_to_overwrite_existing_config() {
        let temp = tempdir().unwrap();
        let config = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config, "foo").unwrap();

        let created = scaffold(temp.path()).unwrap();

        assert!(created.is_empty());
        assert_eq!(fs::read_to_string(&config).unwrap(), "foo");
        assert!(!temp.path().join("doc_assets").exists());
    }

    #[test]
    fn default_header_documents_safe_filter() {
        assert!(DEFAULT_HEADER.contains("| safe"));
    }

    #[test]
    fn default_config_loads() {
        let temp = tempdir().unwrap();
        scaffold(temp.path()).unwrap();

        let registry = swatch_markdown::RendererRegistry::with_builtins();
        let config =
            swatch_static::Config::load(&temp.path().join(DEFAULT_CONFIG_FILE), &registry)
                .unwrap();

        assert_eq!(
            config.options().destination.as_deref(),
            Some(Path::new("./docs"))
        );
        assert!(config.dependencies().is_empty());
    }
}
