// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Materializing referenced directories into memory.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Errors};

#[cfg(test)]
#[path = "./collect_test.rs"]
mod collect_test;

/// One directory as it was on disk at collection time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryTree {
    /// Identity of the tree.
    pub path: PathBuf,
    pub files: BTreeMap<String, Vec<u8>>,
    /// Full paths of the child directories, each present in the same
    /// [`TreeMapping`].
    pub subdirectories: BTreeSet<PathBuf>,
}

impl DirectoryTree {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Number of path components, used to emit children before parents.
    pub fn depth(&self) -> usize {
        self.path.components().count()
    }
}

/// Every collected directory keyed by its path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeMapping {
    trees: BTreeMap<PathBuf, DirectoryTree>,
}

impl TreeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&DirectoryTree> {
        self.trees.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.trees.contains_key(path)
    }

    pub fn insert(&mut self, tree: DirectoryTree) {
        self.trees.insert(tree.path.clone(), tree);
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Trees in path order.
    pub fn iter(&self) -> impl Iterator<Item = &DirectoryTree> {
        self.trees.values()
    }

    /// Total bytes of file content held.
    pub fn total_bytes(&self) -> usize {
        self.iter()
            .flat_map(|t| t.files.values())
            .map(Vec::len)
            .sum()
    }
}

/// Reads directories into a [`TreeMapping`], visiting each path at most
/// once however many roots lead to it.
///
/// Failures are recorded and collection carries on with the next entry.
#[derive(Debug)]
pub struct TreeCollector {
    skip: BTreeSet<OsString>,
    trees: TreeMapping,
    errors: Errors,
}

impl TreeCollector {
    /// `skip` holds entry names that are never embedded or descended into.
    pub fn new(skip: BTreeSet<OsString>) -> Self {
        Self {
            skip,
            trees: TreeMapping::new(),
            errors: Errors::new(),
        }
    }

    /// Collect `root` and everything below it, unless it was already
    /// collected.
    pub fn collect(&mut self, root: &Path) {
        self.collect_dir(root);
    }

    pub fn trees(&self) -> &TreeMapping {
        &self.trees
    }

    pub fn finish(self) -> (TreeMapping, Vec<Error>) {
        (self.trees, self.errors.into_vec())
    }

    /// Returns whether a tree for `path` exists afterwards.
    fn collect_dir(&mut self, path: &Path) -> bool {
        if self.trees.contains(path) {
            tracing::trace!(?path, "already collected");
            return true;
        }

        let entries = match read_sorted(path) {
            Ok(entries) => entries,
            Err(error) => {
                self.errors.push(Error::ReadDirFailed {
                    path: path.to_path_buf(),
                    error,
                });
                return false;
            }
        };

        let mut tree = DirectoryTree::new(path);
        for entry in entries {
            if self.skip.contains(&entry.file_name()) {
                continue;
            }
            let child = entry.path();
            let Ok(name) = entry.file_name().into_string() else {
                self.errors.push(Error::NonUtf8Name { path: child });
                continue;
            };

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(error) => {
                    self.errors.push(Error::ReadFailed { path: child, error });
                    continue;
                }
            };

            if file_type.is_dir() {
                if self.collect_dir(&child) {
                    tree.subdirectories.insert(child);
                }
                continue;
            }

            if file_type.is_symlink() && child.is_dir() {
                tracing::warn!(path = ?child, "not following directory symlink");
                continue;
            }

            match std::fs::read(&child) {
                Ok(contents) => {
                    tree.files.insert(name, contents);
                }
                Err(error) => self.errors.push(Error::ReadFailed { path: child, error }),
            }
        }

        tracing::debug!(
            ?path,
            files = tree.files.len(),
            subdirectories = tree.subdirectories.len(),
            "collected directory"
        );
        self.trees.insert(tree);
        true
    }
}

fn read_sorted(path: &Path) -> std::io::Result<Vec<std::fs::DirEntry>> {
    let mut entries = std::fs::read_dir(path)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

/// Collect every root into one mapping.
pub fn collect<I, P>(roots: I, skip: &BTreeSet<OsString>) -> (TreeMapping, Vec<Error>)
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut collector = TreeCollector::new(skip.clone());
    for root in roots {
        collector.collect(root.as_ref());
    }
    collector.finish()
}
