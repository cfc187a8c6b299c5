// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for zap operations.

use std::fmt;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

#[cfg(test)]
#[path = "./error_test.rs"]
mod error_test;

/// Convenience Result type with zap Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Ways a call site can fail to match `<alias>::resource("key", "path")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScanErrorKind {
    /// The runtime crate was used, but not to call `resource`
    UnknownCall,
    /// An argument to `resource` was not a string literal
    BadArgumentType,
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCall => f.write_str("expected resource() but was something else"),
            Self::BadArgumentType => f.write_str("calls to resource() require string literals"),
        }
    }
}

/// A malformed call site, positioned in its source file.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("{}:{}:{}: {}", .file.display(), .line, .column, .kind)]
#[diagnostic(
    code(zap::bad_call_site),
    help("resource() takes two string literals: a key and a path relative to the calling file")
)]
pub struct ScanDiagnostic {
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    pub kind: ScanErrorKind,
}

/// Errors that can occur during zap operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// A call site that does not have the literal-literal shape
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scan(#[from] ScanDiagnostic),

    /// Source file could not be parsed
    #[error("Failed to parse {}: {error}", .path.display())]
    #[diagnostic(code(zap::parse_failed))]
    ParseFailed {
        path: PathBuf,
        #[source]
        error: syn::Error,
    },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(zap::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Failed to list a directory while collecting it
    #[error("Failed to read directory: {path:?}")]
    #[diagnostic(
        code(zap::read_dir_failed),
        help("Check that the path passed to resource() names a readable directory")
    )]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Directory entry whose name cannot be embedded as a string key
    #[error("File name is not valid UTF-8: {path:?}")]
    #[diagnostic(code(zap::non_utf8_name))]
    NonUtf8Name { path: PathBuf },

    /// The same key names two different directories
    #[error("Resource key {key:?} refers to both {first:?} and {second:?}")]
    #[diagnostic(
        code(zap::duplicate_key),
        help("Keys must be unique across the project; rename one of the calls or set allow_duplicate_keys")
    )]
    DuplicateKey {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Generated code referenced a directory that was never emitted
    #[error("Directory {parent:?} links to {child:?}, which was not collected")]
    #[diagnostic(code(zap::missing_reference))]
    MissingReference { parent: PathBuf, child: PathBuf },

    /// Generated code did not parse
    #[error("Generated code is invalid: {0}")]
    #[diagnostic(
        code(zap::generation_failed),
        help("This is a bug in zap, please report it")
    )]
    Generation(String),

    /// Invalid YAML in config file
    #[error("Invalid zap.yaml file: {error}")]
    #[diagnostic(
        code(zap::invalid_yaml),
        help("Check YAML syntax and ensure 'api: zap/v0' is present")
    )]
    InvalidYaml {
        #[source]
        error: serde_yaml::Error,
        yaml_content: String,
    },

    /// Expected file or directory is missing
    #[error("Not found: {0:?}")]
    #[diagnostic(code(zap::not_found_at_path))]
    NotFoundAtPath(PathBuf),

    /// Project walk failed
    #[error(transparent)]
    #[diagnostic(code(zap::walk_failed))]
    Walk(#[from] walkdir::Error),

    /// Several errors from one phase
    #[error("{}", display_all(errors))]
    #[diagnostic(code(zap::aggregate))]
    Aggregate {
        #[related]
        errors: Vec<Error>,
    },

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(zap::io_error))]
    Io(#[from] std::io::Error),
}

fn display_all(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    /// Where the error points, used to order diagnostics for display.
    pub fn location(&self) -> (Option<&Path>, usize, usize) {
        match self {
            Self::Scan(diag) => (Some(&diag.file), diag.line, diag.column),
            Self::ParseFailed { path, error } => {
                let start = error.span().start();
                (Some(path), start.line, start.column + 1)
            }
            Self::ReadFailed { path, .. }
            | Self::ReadDirFailed { path, .. }
            | Self::NonUtf8Name { path }
            | Self::NotFoundAtPath(path) => (Some(path), 0, 0),
            Self::DuplicateKey { second, .. } => (Some(second), 0, 0),
            Self::MissingReference { parent, .. } => (Some(parent), 0, 0),
            _ => (None, 0, 0),
        }
    }
}

/// Accumulates every error from a phase instead of stopping at the first.
#[derive(Debug, Default)]
pub struct Errors {
    errors: Vec<Error>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: impl Into<Error>) {
        match error.into() {
            Error::Aggregate { errors } => self.errors.extend(errors),
            error => self.errors.push(error),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter()
    }

    /// Order by file, line and column so output does not depend on the
    /// order errors were found in.
    pub fn sort(&mut self) {
        self.errors.sort_by(|a, b| a.location().cmp(&b.location()));
    }

    /// `Ok(value)` when nothing was recorded, otherwise every error at once.
    pub fn into_result<T>(self, value: T) -> Result<T> {
        match self.into_error() {
            None => Ok(value),
            Some(err) => Err(err),
        }
    }

    /// Collapse into a single error, if any were recorded.
    pub fn into_error(mut self) -> Option<Error> {
        match self.errors.len() {
            0 => None,
            1 => self.errors.pop(),
            _ => Some(Error::Aggregate {
                errors: self.errors,
            }),
        }
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.errors
    }
}

impl Extend<Error> for Errors {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        for error in iter {
            self.push(error);
        }
    }
}

impl From<Vec<Error>> for Errors {
    fn from(errors: Vec<Error>) -> Self {
        let mut collected = Self::new();
        collected.extend(errors);
        collected
    }
}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
