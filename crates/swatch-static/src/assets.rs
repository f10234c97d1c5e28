//! Copying dependencies and documentation assets into the output directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::warning::{BuildWarning, Warnings};

/// Errors that can occur while copying a tree.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("refusing to copy {} into itself", .0.display())]
    IntoItself(PathBuf),
}

impl CopyError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Whether a top-level entry of the assets directory is left out of the output.
///
/// Underscore-prefixed entries hold templates and partials; dot-prefixed ones
/// are hidden files.
pub fn should_skip_asset(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

/// Remove a file or directory if it exists.
pub fn remove_existing(path: &Path) -> Result<(), CopyError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(CopyError::io(path, e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| CopyError::io(path, e))
}

/// Copy a file or directory tree to `dst`, overwriting files that exist.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<(), CopyError> {
    if dst.starts_with(src) {
        return Err(CopyError::IntoItself(src.to_path_buf()));
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let target = match entry.path().strip_prefix(src) {
            Ok(relative) if !relative.as_os_str().is_empty() => dst.join(relative),
            _ => dst.to_path_buf(),
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| CopyError::io(&target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| CopyError::io(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| CopyError::io(entry.path(), e))?;
        }
    }

    Ok(())
}

/// Replace `output_dir/<name>` with a fresh copy of `src`.
fn replace_with_copy(src: &Path, output_dir: &Path) -> Result<(), CopyError> {
    let name = src
        .file_name()
        .ok_or_else(|| CopyError::IntoItself(src.to_path_buf()))?;
    let target = output_dir.join(name);

    remove_existing(&target)?;
    copy_tree(src, &target)
}

/// Copy each dependency directory into the output directory.
///
/// Relative paths resolve against `base_path`. Paths that exist but are not
/// directories are skipped. Failures become warnings and the remaining
/// dependencies are still copied. Returns the number copied.
pub fn copy_dependencies(
    dependencies: &[PathBuf],
    base_path: &Path,
    output_dir: &Path,
    warnings: &mut Warnings,
) -> usize {
    let mut copied = 0;

    for dir in dependencies {
        let result = fs::canonicalize(base_path.join(dir))
            .map_err(|e| CopyError::io(dir, e))
            .and_then(|dirpath| {
                if !dirpath.is_dir() {
                    tracing::debug!("Skipping dependency {}, not a directory", dir.display());
                    return Ok(false);
                }
                replace_with_copy(&dirpath, output_dir).map(|()| true)
            });

        match result {
            Ok(true) => {
                tracing::debug!("Copied dependency {}", dir.display());
                copied += 1;
            }
            Ok(false) => {}
            Err(e) => warnings.push(BuildWarning::DependencyCopy {
                path: dir.clone(),
                reason: e.to_string(),
            }),
        }
    }

    copied
}

/// Copy the top-level entries of the assets directory into the output directory.
///
/// Underscore-prefixed and hidden entries are skipped. Each copied entry
/// replaces any existing output entry of the same name. Returns the number of
/// entries copied.
pub fn copy_assets(assets_dir: &Path, output_dir: &Path, warnings: &mut Warnings) -> usize {
    let entries = match fs::read_dir(assets_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(BuildWarning::AssetCopy {
                path: assets_dir.to_path_buf(),
                reason: e.to_string(),
            });
            return 0;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            !should_skip_asset(name)
        })
        .collect();
    paths.sort();

    let mut copied = 0;
    for path in paths {
        match replace_with_copy(&path, output_dir) {
            Ok(()) => copied += 1,
            Err(e) => warnings.push(BuildWarning::AssetCopy {
                path,
                reason: e.to_string(),
            }),
        }
    }

    copied
}
