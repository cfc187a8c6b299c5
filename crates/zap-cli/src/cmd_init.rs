// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `zap init` command.

use clap::Args;
use miette::Result;
use std::path::PathBuf;

use crate::CliError;

#[cfg(test)]
#[path = "./cmd_init_test.rs"]
mod cmd_init_test;

/// Create a new zap.yaml file
#[derive(Debug, Args)]
pub struct CmdInit {
    /// Directory to create file in
    #[clap(default_value = ".")]
    path: PathBuf,

    /// Generated module path, relative to the project root
    #[clap(long, default_value = zap::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Name of the runtime crate dependency
    #[clap(long, default_value = zap::RUNTIME_CRATE)]
    runtime_crate: String,
}

impl CmdInit {
    pub async fn run(&mut self) -> Result<i32> {
        let config_path = self.path.join(zap::ZAP_CONFIG_FILENAME);

        // Check if file already exists
        if config_path.exists() {
            return Err(CliError::ConfigExists(config_path).into());
        }

        std::fs::write(&config_path, self.template()).map_err(|error| {
            CliError::WriteFailed {
                path: config_path.clone(),
                error,
            }
        })?;

        println!("Created zap.yaml at {:?}", config_path);
        println!();
        println!("Next steps:");
        println!(
            "  1. Add `mod {};` to your crate",
            self.output
                .file_stem()
                .map(|s| s.to_string_lossy())
                .unwrap_or_default()
        );
        println!("  2. Call {}::resource(\"KEY\", \"dir/\") where you need files", self.runtime_crate);
        println!("  3. Run 'zap build' to generate the module");

        Ok(0)
    }

    fn template(&self) -> String {
        format!(
            "# zap project configuration\n\
            \n\
            api: zap/v0\n\
            \n\
            # Crate whose resource() calls are scanned. Change this when the\n\
            # dependency is renamed in Cargo.toml.\n\
            runtime_crate: {}\n\
            \n\
            # Generated module, relative to this file\n\
            output: {}\n\
            \n\
            # Extra directory names to skip while looking for sources\n\
            # skip_dirs:\n\
            #   - fixtures\n\
            \n\
            # Let a later call bind an existing key to a different directory\n\
            allow_duplicate_keys: false\n",
            self.runtime_crate,
            self.output.display(),
        )
    }
}
