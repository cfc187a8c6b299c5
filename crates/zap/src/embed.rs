// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! One discovery-to-source pass over a project.
//!
//! Scanning runs per package and can be done in any order or in parallel;
//! [`merge_scans`] puts the results back into a stable order before
//! anything depends on it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::codegen::{generate, GenerateOptions};
use crate::collect::collect;
use crate::discovery::Package;
use crate::resource::CallSite;
use crate::scanner::scan;
use crate::source::parse_source;
use crate::{Config, Error, Errors, Result};

#[cfg(test)]
#[path = "./embed_test.rs"]
mod embed_test;

/// Everything found in one package.
#[derive(Debug, Default)]
pub struct PackageScan {
    pub dir: PathBuf,
    /// Calls with paths already resolved against `dir`. Partial calls keep
    /// their empty path.
    pub calls: Vec<CallSite>,
    /// Unreadable or unparsable files and malformed calls.
    pub errors: Vec<Error>,
}

/// Parse and scan every file of `package`.
///
/// A file that fails to read or parse is recorded and the remaining files
/// are still scanned.
pub fn scan_package(package: &Package, config: &Config) -> PackageScan {
    let mut result = PackageScan {
        dir: package.dir.clone(),
        ..Default::default()
    };

    for path in &package.source_files {
        let source = match parse_source(path, &config.runtime_crate) {
            Ok(source) => source,
            Err(err) => {
                result.errors.push(err);
                continue;
            }
        };

        let output = scan(&source);
        result
            .errors
            .extend(output.diagnostics.into_iter().map(Error::Scan));
        result
            .calls
            .extend(output.calls.into_iter().map(|call| {
                if call.resource.is_partial() {
                    return call;
                }
                CallSite {
                    resource: call.resource.resolve(&package.dir),
                    ..call
                }
            }));
    }

    tracing::debug!(
        dir = ?package.dir,
        files = package.source_files.len(),
        calls = result.calls.len(),
        errors = result.errors.len(),
        "scanned package"
    );
    result
}

/// The combined scan of a project.
#[derive(Debug, Default)]
pub struct EmbedPlan {
    /// Resolved directory for every key.
    pub resources: BTreeMap<String, PathBuf>,
    /// Every call site, ordered by file and position.
    pub calls: Vec<CallSite>,
    /// Sorted by file, line and column.
    pub errors: Errors,
}

impl EmbedPlan {
    /// Distinct directories to collect.
    pub fn roots(&self) -> BTreeSet<&Path> {
        self.resources.values().map(PathBuf::as_path).collect()
    }
}

/// Combine package scans and bind keys to directories.
///
/// Partial calls are kept in `calls` but never bound. The same key and directory from several calls is fine. A key naming two
/// different directories is a [`Error::DuplicateKey`] unless the config
/// allows it, in which case the later call wins.
pub fn merge_scans(scans: Vec<PackageScan>, config: &Config) -> EmbedPlan {
    let mut plan = EmbedPlan::default();
    for scan in scans {
        plan.calls.extend(scan.calls);
        plan.errors.extend(scan.errors);
    }
    plan.calls
        .sort_by(|a, b| (&a.file, a.position).cmp(&(&b.file, b.position)));

    for call in plan.calls.iter().filter(|call| !call.resource.is_partial()) {
        let key = &call.resource.key;
        let path = &call.resource.path;
        match plan.resources.get(key) {
            Some(bound) if bound == path => {}
            Some(bound) if config.allow_duplicate_keys => {
                tracing::warn!(key, previous = ?bound, ?path, "resource key rebound");
                plan.resources.insert(key.clone(), path.clone());
            }
            Some(bound) => plan.errors.push(Error::DuplicateKey {
                key: key.clone(),
                first: bound.clone(),
                second: path.clone(),
            }),
            None => {
                plan.resources.insert(key.clone(), path.clone());
            }
        }
    }

    plan.errors.sort();
    tracing::info!(
        calls = plan.calls.len(),
        resources = plan.resources.len(),
        errors = plan.errors.len(),
        "merged scans"
    );
    plan
}

/// Output of a successful pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Formatted module to write to the configured output.
    pub source: String,
    pub resources: BTreeMap<String, PathBuf>,
    pub development_mode: bool,
    /// Directories embedded.
    pub trees: usize,
    /// File bytes embedded.
    pub bytes: usize,
}

/// Collect and render a merged plan.
///
/// Nothing is generated when the plan or the collection holds any error;
/// all of them are returned together. In development mode the directories
/// are not read at all and the module reads them from disk instead.
pub fn generate_plan(
    plan: EmbedPlan,
    config: &Config,
    project_root: &Path,
    development_mode: bool,
) -> Result<Generated> {
    let EmbedPlan {
        resources, errors, ..
    } = plan;
    if let Some(err) = errors.into_error() {
        return Err(err);
    }

    let (trees, registry) = if development_mode {
        Default::default()
    } else {
        let roots = resources.values().collect::<BTreeSet<_>>();
        let (trees, errors) = collect(roots, &config.collector_skips());
        let mut errors = Errors::from(errors);
        errors.sort();
        (errors.into_result(trees)?, resources.clone())
    };

    let options = GenerateOptions {
        runtime_crate: config.runtime_crate.clone(),
        development_mode,
        source_root: project_root.to_path_buf(),
    };
    let source = generate(&trees, &registry, &options)?;

    tracing::info!(
        resources = resources.len(),
        trees = trees.len(),
        bytes = trees.total_bytes(),
        development_mode,
        "generated embed module"
    );
    Ok(Generated {
        source,
        resources,
        development_mode,
        trees: trees.len(),
        bytes: trees.total_bytes(),
    })
}

/// Scan `packages`, collect what they reference and render the module.
pub fn build(
    packages: &[Package],
    config: &Config,
    project_root: &Path,
    development_mode: bool,
) -> Result<Generated> {
    let scans = packages
        .iter()
        .map(|package| scan_package(package, config))
        .collect();
    generate_plan(
        merge_scans(scans, config),
        config,
        project_root,
        development_mode,
    )
}
