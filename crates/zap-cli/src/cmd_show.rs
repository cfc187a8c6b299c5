// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `zap show` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use miette::Result;

use crate::CliError;

/// List discovered resources and problems
#[derive(Debug, Args)]
pub struct CmdShow {
    #[clap(flatten)]
    project: crate::ProjectFlags,

    /// Also list every call site
    #[clap(long)]
    calls: bool,

    /// Output format: table, yaml
    #[clap(long, default_value = "table")]
    format: String,
}

impl CmdShow {
    pub async fn run(&mut self) -> Result<i32> {
        let (root, config) = self.project.load()?;
        let plan = crate::scan_project(&root, &config).await?;

        if self.format == "yaml" {
            self.show_yaml(&plan)?;
        } else {
            self.show_resources_table(&plan);
            if self.calls {
                println!();
                self.show_calls_table(&plan, &root);
            }
        }

        if plan.errors.is_empty() {
            return Ok(0);
        }

        eprintln!();
        eprintln!("{}", "Problems:".bold());
        for err in plan.errors.iter() {
            eprintln!("  {} {err}", "error:".red());
        }
        Ok(1)
    }

    fn show_resources_table(&self, plan: &zap::EmbedPlan) {
        println!("{}", "Resources:".bold());
        println!();

        if plan.resources.is_empty() {
            println!("  {}", "(no resources)".dimmed());
        }
        for (key, path) in &plan.resources {
            let exists = if path.is_dir() {
                String::new()
            } else {
                " [missing]".to_string()
            };
            println!("  {} -> {}{}", key.cyan(), path.display(), exists.red());
        }

        println!();
        println!(
            "Total: {} resource(s), {} directories",
            plan.resources.len(),
            plan.roots().len()
        );
    }

    fn show_calls_table(&self, plan: &zap::EmbedPlan, root: &std::path::Path) {
        println!("{}", "Call Sites:".bold());
        println!();

        for call in &plan.calls {
            let file = call.file.strip_prefix(root).unwrap_or(&call.file);
            println!(
                "  {}:{}:{} {}",
                file.display(),
                call.position.line,
                call.position.column,
                call.resource.key.green()
            );
        }
    }

    fn show_yaml(&self, plan: &zap::EmbedPlan) -> Result<()> {
        #[derive(serde::Serialize)]
        struct Listing<'a> {
            resources: &'a BTreeMap<String, PathBuf>,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            errors: Vec<String>,
        }

        let listing = Listing {
            resources: &plan.resources,
            errors: plan.errors.iter().map(ToString::to_string).collect(),
        };
        print!("{}", serde_yaml::to_string(&listing).map_err(CliError::from)?);
        Ok(())
    }
}
