// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `zap build` command.

use std::path::Path;

use clap::Args;
use colored::Colorize;
use miette::Result;

use crate::CliError;

/// Generate the embed module
#[derive(Debug, Args)]
pub struct CmdBuild {
    #[clap(flatten)]
    project: crate::ProjectFlags,
}

impl CmdBuild {
    pub async fn run(&mut self) -> Result<i32> {
        let (root, config) = self.project.load()?;
        let plan = crate::scan_project(&root, &config).await?;
        let generated = zap::generate_plan(plan, &config, &root, self.project.dev)?;

        let output = config.output_path(&root);
        if std::fs::read_to_string(&output).is_ok_and(|current| current == generated.source) {
            println!("{} {}", "Up to date:".green(), output.display());
            return Ok(0);
        }
        write_output(&output, &generated.source)?;

        let mode = if generated.development_mode {
            "development".yellow()
        } else {
            "embedded".cyan()
        };
        println!("{} {} ({mode})", "Wrote".green(), output.display());
        println!(
            "  {} resource(s), {} directories, {} bytes",
            generated.resources.len(),
            generated.trees,
            generated.bytes
        );
        Ok(0)
    }
}

/// Write the module, creating missing parent directories.
pub fn write_output(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| CliError::WriteFailed {
            path: parent.to_path_buf(),
            error,
        })?;
    }
    std::fs::write(path, source).map_err(|error| CliError::WriteFailed {
        path: path.to_path_buf(),
        error,
    })?;
    tracing::info!(?path, bytes = source.len(), "wrote embed module");
    Ok(())
}
