// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for resource lookups.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience Result type with zapped Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by resource, file and directory lookups.
#[derive(Error, Debug)]
pub enum Error {
    /// The named resource, file or directory does not exist
    #[error("a {what} with name {name} could not be found")]
    NotFound { what: &'static str, name: String },

    /// Reading a live file or directory failed
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `resource` was called before a provider was installed
    #[error("no resource provider has been installed, call zapped::install first")]
    NotInstalled,

    /// `install` was called more than once
    #[error("a resource provider has already been installed")]
    AlreadyInstalled,
}

impl Error {
    pub(crate) fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            name: name.into(),
        }
    }

    /// True when the lookup failed because the target does not exist.
    ///
    /// Live reads report a missing file through [`Error::Io`] with
    /// [`std::io::ErrorKind::NotFound`], which also counts.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
