// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Resource providers for embedded and development mode.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::directory::{EmbeddedDirectory, LiveDirectory};
use crate::{Directory, Error, Result};

#[cfg(test)]
#[path = "./provider_test.rs"]
mod provider_test;

/// Resolves resource keys to directories.
///
/// The mode is fixed by which implementation is constructed: [`Registry`]
/// serves embedded data, [`LiveProvider`] reads the filesystem.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Find the resource registered under `key`.
    ///
    /// `relative_path` and `caller` are the arguments of the original call
    /// site; only development mode uses them.
    fn resource(
        &self,
        key: &str,
        relative_path: &str,
        caller: &Location<'_>,
    ) -> Result<Directory>;
}

/// Embedded resources keyed by the name given at the call site.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    resources: BTreeMap<String, Arc<EmbeddedDirectory>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource, returning the directory previously bound to `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        directory: Arc<EmbeddedDirectory>,
    ) -> Option<Arc<EmbeddedDirectory>> {
        self.resources.insert(key.into(), directory)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Look up a resource without call-site information.
    pub fn get(&self, key: &str) -> Result<Directory> {
        self.resources
            .get(key)
            .map(|dir| Directory::Embedded(Arc::clone(dir)))
            .ok_or_else(|| Error::not_found("resource", key))
    }
}

impl ResourceProvider for Registry {
    fn resource(
        &self,
        key: &str,
        _relative_path: &str,
        _caller: &Location<'_>,
    ) -> Result<Directory> {
        tracing::trace!(key, "embedded resource lookup");
        self.get(key)
    }
}

/// Development mode provider that resolves paths against the caller's
/// source file.
///
/// [`Location::file`] is relative to the directory the compiler was run
/// from, which for cargo is the workspace root rather than the member
/// crate. A relative caller file is looked up under `source_root` and then
/// each of its ancestors, and the first one holding the file wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveProvider {
    source_root: PathBuf,
}

impl LiveProvider {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// The directory containing the caller's source file.
    fn caller_dir(&self, caller: &Location<'_>) -> Option<PathBuf> {
        let file = Path::new(caller.file());
        let file = if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.source_root
                .ancestors()
                .map(|root| root.join(file))
                .find(|candidate| candidate.is_file())
                .unwrap_or_else(|| self.source_root.join(file))
        };
        file.parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

impl ResourceProvider for LiveProvider {
    fn resource(
        &self,
        key: &str,
        relative_path: &str,
        caller: &Location<'_>,
    ) -> Result<Directory> {
        let base = self
            .caller_dir(caller)
            .ok_or_else(|| Error::not_found("caller directory for resource", key))?;
        let path = base.join(relative_path);
        tracing::trace!(key, ?path, "live resource lookup");
        Ok(Directory::Live(LiveDirectory::new(path)))
    }
}
