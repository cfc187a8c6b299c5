// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! zap - embed directories into Rust programs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_build;
mod cmd_check;
mod cmd_init;
mod cmd_show;
mod error;

use cmd_build::CmdBuild;
use cmd_check::CmdCheck;
use cmd_init::CmdInit;
use cmd_show::CmdShow;
use error::CliError;


#[derive(Parser)]
#[clap(
    name = "zap",
    about = "Embed directories into Rust programs",
    version,
    long_about = "Find zapped::resource() calls in a project and generate a module embedding the directories they name"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long)]
    quiet: bool,
}

/// Where the project is and how to generate it.
#[derive(Parser, Clone, Debug, Default)]
pub struct ProjectFlags {
    /// Project root
    #[clap(short = 'C', long = "directory", default_value = ".")]
    pub directory: PathBuf,

    /// Generate a module that reads resources from disk
    #[clap(long, env = "ZAP_DEV_MODE")]
    pub dev: bool,

    /// Generated module path, overriding zap.yaml
    #[clap(long, env = "ZAP_OUTPUT")]
    pub output: Option<PathBuf>,
}

impl ProjectFlags {
    /// Canonical project root and its configuration with flags applied.
    pub fn load(&self) -> Result<(PathBuf, zap::Config)> {
        let root = dunce::canonicalize(&self.directory)
            .map_err(|_| zap::Error::NotFoundAtPath(self.directory.clone()))?;
        let mut config = zap::Config::discover(&root)?;
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        tracing::debug!(?root, ?config, "loaded project");
        Ok((root, config))
    }
}

/// Scan every package under `root` in parallel and merge the results.
pub async fn scan_project(root: &Path, config: &zap::Config) -> Result<zap::EmbedPlan> {
    let packages = zap::discover_packages(root, config)?;
    let shared = Arc::new(config.clone());

    let mut tasks = tokio::task::JoinSet::new();
    for package in packages {
        let config = Arc::clone(&shared);
        tasks.spawn_blocking(move || zap::scan_package(&package, &config));
    }

    let mut scans = Vec::with_capacity(tasks.len());
    while let Some(scan) = tasks.join_next().await {
        scans.push(scan.map_err(CliError::ScanTask)?);
    }
    Ok(zap::merge_scans(scans, config))
}

#[derive(Subcommand)]
enum Command {
    /// Create a new zap.yaml file
    Init(CmdInit),

    /// Generate the embed module
    Build(CmdBuild),

    /// List discovered resources and problems
    Show(CmdShow),

    /// Verify the embed module is up to date
    Check(CmdCheck),
}

impl Opt {
    async fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        // Dispatch to command
        match self.cmd {
            Command::Init(mut cmd) => cmd.run().await,
            Command::Build(mut cmd) => cmd.run().await,
            Command::Show(mut cmd) => cmd.run().await,
            Command::Check(mut cmd) => cmd.run().await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run().await?;
    std::process::exit(code);
}
