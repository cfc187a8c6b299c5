// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Embedded and live directory handles.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Error, Result};

#[cfg(test)]
#[path = "./directory_test.rs"]
mod directory_test;

/// The contents of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    contents: Cow<'static, [u8]>,
}

impl File {
    pub fn new(contents: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    /// The raw bytes of the file.
    pub fn bytes(&self) -> &[u8] {
        &self.contents
    }

    /// The file as text, if it is valid UTF-8.
    pub fn contents_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.contents.into_owned()
    }
}

/// A directory whose contents were baked into the binary.
///
/// Generated code builds these bottom-up: children are wrapped in an
/// [`Arc`] before being linked into their parent, so a subtree shared by two
/// resources exists once in memory.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedDirectory {
    files: BTreeMap<String, File>,
    directories: BTreeMap<String, Arc<EmbeddedDirectory>>,
}

impl EmbeddedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any earlier file with the same name.
    pub fn insert_file(&mut self, name: impl Into<String>, contents: impl Into<Cow<'static, [u8]>>) {
        self.files.insert(name.into(), File::new(contents));
    }

    /// Link a child directory under `name`.
    pub fn insert_directory(&mut self, name: impl Into<String>, directory: Arc<EmbeddedDirectory>) {
        self.directories.insert(name.into(), directory);
    }
}

/// A directory read through to the filesystem on every access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveDirectory {
    path: PathBuf,
}

impl LiveDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&self, name: &str) -> Result<File> {
        let path = self.path.join(name);
        tracing::trace!(?path, "reading live file");
        let bytes = std::fs::read(&path).map_err(|source| Error::Io { path, source })?;
        Ok(File::new(bytes))
    }

    fn entries(&self, want_dirs: bool) -> Vec<String> {
        let read = match std::fs::read_dir(&self.path) {
            Ok(read) => read,
            Err(err) => {
                tracing::debug!(path = ?self.path, %err, "cannot list live directory");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = read
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_type()
                    .map(|ft| ft.is_dir() == want_dirs)
                    .unwrap_or(false)
            })
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }
}

/// A directory handed out by a [`crate::ResourceProvider`].
#[derive(Debug, Clone)]
pub enum Directory {
    Embedded(Arc<EmbeddedDirectory>),
    Live(LiveDirectory),
}

impl Directory {
    /// Look up a file by name.
    ///
    /// Embedded directories fail with [`Error::NotFound`]. Live directories
    /// read the file from disk on each call and surface the I/O error as is,
    /// so a missing file and an unreadable one stay distinguishable.
    pub fn file(&self, name: &str) -> Result<File> {
        match self {
            Self::Embedded(dir) => dir
                .files
                .get(name)
                .cloned()
                .ok_or_else(|| Error::not_found("file", name)),
            Self::Live(dir) => dir.file(name),
        }
    }

    /// Look up a child directory by name.
    ///
    /// Live directories always succeed; existence is checked by the next
    /// lookup made through the returned handle.
    pub fn directory(&self, name: &str) -> Result<Directory> {
        match self {
            Self::Embedded(dir) => dir
                .directories
                .get(name)
                .map(|child| Self::Embedded(Arc::clone(child)))
                .ok_or_else(|| Error::not_found("directory", name)),
            Self::Live(dir) => Ok(Self::Live(LiveDirectory::new(dir.path.join(name)))),
        }
    }

    /// Names of the files in this directory, sorted.
    pub fn files(&self) -> Vec<String> {
        match self {
            Self::Embedded(dir) => dir.files.keys().cloned().collect(),
            Self::Live(dir) => dir.entries(false),
        }
    }

    /// Names of the subdirectories in this directory, sorted.
    pub fn directories(&self) -> Vec<String> {
        match self {
            Self::Embedded(dir) => dir.directories.keys().cloned().collect(),
            Self::Live(dir) => dir.entries(true),
        }
    }

    /// The filesystem location backing a live directory.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Embedded(_) => None,
            Self::Live(dir) => Some(dir.path()),
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }
}
