// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Verify that the generated module matches the project.

use clap::Args;
use colored::Colorize;
use miette::Result;

#[cfg(test)]
#[path = "./cmd_check_test.rs"]
mod cmd_check_test;

/// Verify the embed module is up to date
#[derive(Debug, Args)]
pub struct CmdCheck {
    #[clap(flatten)]
    project: crate::ProjectFlags,
}

impl CmdCheck {
    pub async fn run(&mut self) -> Result<i32> {
        let (root, config) = self.project.load()?;
        let plan = crate::scan_project(&root, &config).await?;
        let generated = zap::generate_plan(plan, &config, &root, self.project.dev)?;

        let output = config.output_path(&root);
        let current = match std::fs::read_to_string(&output) {
            Ok(current) => current,
            Err(err) => {
                eprintln!("{} {} ({err})", "Missing:".red(), output.display());
                eprintln!("\nRun 'zap build' to generate it");
                return Ok(1);
            }
        };

        if current == generated.source {
            println!("✓ {} is up to date", output.display());
            return Ok(0);
        }

        eprintln!("{} {}", "Out of date:".red(), output.display());
        if let Some(line) = first_difference(&current, &generated.source) {
            eprintln!("  first difference at line {line}");
        }
        eprintln!("\nRun 'zap build' to regenerate it");
        Ok(1)
    }
}

/// 1-based line of the first differing line, if any.
fn first_difference(current: &str, expected: &str) -> Option<usize> {
    let mut current_lines = current.lines();
    let mut expected_lines = expected.lines();
    let mut line = 1;
    loop {
        match (current_lines.next(), expected_lines.next()) {
            (None, None) => return None,
            (a, b) if a != b => return Some(line),
            _ => line += 1,
        }
    }
}
