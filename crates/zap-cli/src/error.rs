// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Errors raised by the command line itself rather than the library.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    /// Refusing to replace an existing config
    #[error("zap.yaml already exists at {0:?}")]
    #[diagnostic(code(zap::config_exists), help("Edit the existing file instead"))]
    ConfigExists(PathBuf),

    /// Output could not be written
    #[error("Failed to write {path:?}")]
    #[diagnostic(code(zap::write_failed))]
    WriteFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// A scanning task panicked or was cancelled
    #[error("Scan task failed: {0}")]
    #[diagnostic(code(zap::scan_task))]
    ScanTask(#[source] tokio::task::JoinError),

    /// Results could not be rendered as YAML
    #[error("Failed to format output: {0}")]
    #[diagnostic(code(zap::format_failed))]
    Format(#[from] serde_yaml::Error),
}
