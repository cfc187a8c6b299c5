// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Resources named at call sites and their path resolution.

use std::path::{Component, Path, PathBuf};

use crate::syntax::Position;

#[cfg(test)]
#[path = "./resource_test.rs"]
mod resource_test;

/// A `(key, path)` pair taken from a call to `resource()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resource {
    pub key: String,
    /// Relative to the calling file's directory until resolved.
    pub path: PathBuf,
}

impl Resource {
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }

    /// True when the call's path argument was not captured.
    pub fn is_partial(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    /// Anchor this resource's path at `base`.
    pub fn resolve(self, base: &Path) -> Self {
        Self {
            key: self.key,
            path: clean(&base.join(&self.path)),
        }
    }
}

/// A resource together with the call it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub resource: Resource,
    pub file: PathBuf,
    pub position: Position,
}

/// Rewrite every path relative to `base`, usually the package directory.
pub fn resolve_paths(base: &Path, resources: Vec<Resource>) -> Vec<Resource> {
    resources.into_iter().map(|r| r.resolve(base)).collect()
}

/// Lexically normalize a path: drop `.` and trailing separators and fold
/// `..` into its parent where there is one. Nothing touches the filesystem.
///
/// Two spellings of one directory must produce the same string, since
/// generated identifiers hash the path text.
pub fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
