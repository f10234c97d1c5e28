//! Configuration validation.
//!
//! Every check runs independently, so a config can report several problems
//! at once. Callers usually surface only the first.

use std::fs;
use std::path::PathBuf;

use crate::config::{Config, ResolvedPaths};

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No source directory specified in the config file")]
    MissingSource,

    #[error("No destination directory specified in the config")]
    MissingDestination,

    #[error("No documentation assets directory specified")]
    MissingDocumentationAssets,

    #[error("Can not read source directory ({}), does it exist?", .0.display())]
    UnreadableSource(PathBuf),
}

/// Outcome of validating a config.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Directories resolved during this pass
    pub paths: ResolvedPaths,

    /// Failures in check order
    pub errors: Vec<ValidationError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }
}

impl Config {
    /// Resolve directories and check the config. Has no side effects.
    pub fn validate(&self) -> Validation {
        let paths = self.resolve_dirs();
        let options = self.options();
        let mut errors = Vec::new();

        if options.source.is_none() {
            errors.push(ValidationError::MissingSource);
        }
        if options.destination.is_none() {
            errors.push(ValidationError::MissingDestination);
        }
        if options.documentation_assets.is_none() {
            errors.push(ValidationError::MissingDocumentationAssets);
        }
        if let Some(source) = &options.source {
            let readable = paths
                .input_dir
                .as_deref()
                .is_some_and(|dir| fs::read_dir(dir).is_ok());
            if !readable {
                errors.push(ValidationError::UnreadableSource(source.clone()));
            }
        }

        Validation { paths, errors }
    }

    /// Shorthand for `validate().is_valid()`.
    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }
}
