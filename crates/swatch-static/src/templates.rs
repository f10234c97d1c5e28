//! Header and footer templates from the documentation assets directory.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::Environment;

use crate::render::PageContext;
use crate::warning::{BuildWarning, TemplateRole, Warnings};

/// Compiled header/footer templates, resolved once per build.
pub struct PageTemplates {
    env: Environment<'static>,
    header: bool,
    footer: bool,
}

impl std::fmt::Debug for PageTemplates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageTemplates")
            .field("header", &self.header)
            .field("footer", &self.footer)
            .finish()
    }
}

impl PageTemplates {
    /// Templates that render nothing.
    pub fn empty() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);

        Self {
            env,
            header: false,
            footer: false,
        }
    }

    /// Find and compile `_header.html` / `_footer.html`, falling back to
    /// `header.html` / `footer.html`.
    ///
    /// A missing or broken template is recorded as a warning and that role
    /// renders nothing.
    pub fn resolve(assets_dir: Option<&Path>, warnings: &mut Warnings) -> Self {
        let mut templates = Self::empty();

        for role in TemplateRole::ALL {
            let Some(path) = assets_dir.and_then(|dir| find_template(dir, role)) else {
                warnings.push(BuildWarning::MissingTemplate(role));
                continue;
            };

            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) => {
                    warnings.push(BuildWarning::InvalidTemplate {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            match templates.add(role, source) {
                Ok(()) => tracing::debug!("Using {} template {}", role, path.display()),
                Err(e) => warnings.push(BuildWarning::InvalidTemplate {
                    path,
                    reason: e.to_string(),
                }),
            }
        }

        templates
    }

    /// Compile a template for a role.
    pub fn add(&mut self, role: TemplateRole, source: String) -> Result<(), minijinja::Error> {
        self.env.add_template_owned(role.file_name(), source)?;
        match role {
            TemplateRole::Header => self.header = true,
            TemplateRole::Footer => self.footer = true,
        }
        Ok(())
    }

    pub fn has(&self, role: TemplateRole) -> bool {
        match role {
            TemplateRole::Header => self.header,
            TemplateRole::Footer => self.footer,
        }
    }

    /// Evaluate a role's template, or `None` if there is none.
    pub fn render(
        &self,
        role: TemplateRole,
        context: &PageContext<'_>,
    ) -> Result<Option<String>, minijinja::Error> {
        if !self.has(role) {
            return Ok(None);
        }

        let tmpl = self.env.get_template(&role.file_name())?;
        tmpl.render(context).map(Some)
    }
}

/// Current name first, then the deprecated one.
fn find_template(assets_dir: &Path, role: TemplateRole) -> Option<PathBuf> {
    [role.file_name(), role.legacy_file_name()]
        .into_iter()
        .map(|name| assets_dir.join(name))
        .find(|path| path.is_file())
}
