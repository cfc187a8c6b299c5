// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Discovery of the source directories to scan.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::Config;

#[cfg(test)]
#[path = "./discovery_test.rs"]
mod discovery_test;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["target", "testdata", "node_modules"];

/// A directory of Rust sources. Paths passed to `resource()` in these files
/// are relative to `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub dir: PathBuf,
    /// Absolute paths, sorted.
    pub source_files: Vec<PathBuf>,
}

/// Find every directory under `root` containing `.rs` files.
///
/// Packages are returned sorted by directory. Hidden directories, build
/// output, `testdata` and the configured `skip_dirs` are not entered, and the
/// generated artifact is never listed as a source.
pub fn discover_packages<P: AsRef<Path>>(root: P, config: &Config) -> crate::Result<Vec<Package>> {
    let root = dunce::canonicalize(root.as_ref())
        .map_err(|_| crate::Error::NotFoundAtPath(root.as_ref().to_path_buf()))?;
    let output = config.output_file_name();

    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry, config));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }
        if output.is_some_and(|name| path.file_name() == Some(name)) {
            tracing::debug!(?path, "skipping generated artifact");
            continue;
        }

        let dir = path.parent().unwrap_or(&root).to_path_buf();
        by_dir.entry(dir).or_default().push(path.to_path_buf());
    }

    let packages: Vec<Package> = by_dir
        .into_iter()
        .map(|(dir, mut source_files)| {
            source_files.sort();
            Package { dir, source_files }
        })
        .collect();

    tracing::info!(count = packages.len(), root = ?root, "discovered packages");
    Ok(packages)
}

fn is_skipped_dir(entry: &DirEntry, config: &Config) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let Some(name) = entry.file_name().to_str() else {
        return false;
    };

    name.starts_with('.')
        || SKIPPED_DIRS.contains(&name)
        || config.skip_dirs.iter().any(|skip| skip == name)
}
