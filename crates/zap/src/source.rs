// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Parsing source files and finding how they refer to the runtime crate.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use syn::visit::Visit;
use syn::UseTree;

use crate::ENTRY_POINT;

#[cfg(test)]
#[path = "./source_test.rs"]
mod source_test;

/// One way a file can reach the runtime crate's entry point.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportAlias {
    /// Calls look like `<alias>::resource(..)`.
    Named(String),
    /// The entry point was imported directly (glob or by name) and calls
    /// look like `<name>(..)`.
    Bare(String),
}

/// A parsed source file.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub syntax: syn::File,
    /// Every alias the file can call the entry point through.
    pub aliases: BTreeSet<ImportAlias>,
}

/// Read, parse, and resolve the runtime crate aliases of a file.
pub fn parse_source<P: AsRef<Path>>(path: P, runtime_crate: &str) -> crate::Result<SourceFile> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| crate::Error::ReadFailed {
        path: path.to_path_buf(),
        error: e,
    })?;

    let syntax = syn::parse_file(&text).map_err(|e| crate::Error::ParseFailed {
        path: path.to_path_buf(),
        error: e,
    })?;
    let aliases = resolve_imports(&syntax, runtime_crate);
    tracing::trace!(?path, ?aliases, "parsed source");

    Ok(SourceFile {
        path: path.to_path_buf(),
        syntax,
        aliases,
    })
}

/// Every name `runtime_crate` or its entry point is reachable under in `file`.
///
/// The crate's own name is always included since the extern prelude keeps
/// it in scope whatever the file imports. Each `use` or `extern crate` that
/// renames the crate or imports the entry point adds to the set. Renames to
/// `_` add nothing.
pub fn resolve_imports(file: &syn::File, runtime_crate: &str) -> BTreeSet<ImportAlias> {
    let mut finder = ImportFinder {
        runtime_crate,
        found: BTreeSet::new(),
    };
    finder
        .found
        .insert(ImportAlias::Named(runtime_crate.to_string()));
    finder.visit_file(file);
    finder.found
}

struct ImportFinder<'a> {
    runtime_crate: &'a str,
    found: BTreeSet<ImportAlias>,
}

impl ImportFinder<'_> {
    fn add_tree(&mut self, tree: &UseTree) {
        match tree {
            UseTree::Rename(rename) if rename.ident == self.runtime_crate => {
                self.add_named(&rename.rename);
            }
            UseTree::Path(path) if path.ident == self.runtime_crate => {
                add_entry_points(&path.tree, &mut self.found);
            }
            UseTree::Group(group) => {
                for item in &group.items {
                    self.add_tree(item);
                }
            }
            _ => {}
        }
    }

    fn add_named(&mut self, name: &syn::Ident) {
        if name != "_" {
            self.found.insert(ImportAlias::Named(name.to_string()));
        }
    }
}

/// Look for the entry point inside `zapped::{..}`.
fn add_entry_points(tree: &UseTree, found: &mut BTreeSet<ImportAlias>) {
    match tree {
        UseTree::Glob(_) => {
            found.insert(ImportAlias::Bare(ENTRY_POINT.to_string()));
        }
        UseTree::Name(name) if name.ident == ENTRY_POINT => {
            found.insert(ImportAlias::Bare(ENTRY_POINT.to_string()));
        }
        UseTree::Rename(rename) if rename.ident == ENTRY_POINT && rename.rename != "_" => {
            found.insert(ImportAlias::Bare(rename.rename.to_string()));
        }
        UseTree::Group(group) => {
            for item in &group.items {
                add_entry_points(item, found);
            }
        }
        _ => {}
    }
}

impl<'ast> Visit<'ast> for ImportFinder<'_> {
    fn visit_item_use(&mut self, item: &'ast syn::ItemUse) {
        self.add_tree(&item.tree);
    }

    fn visit_item_extern_crate(&mut self, item: &'ast syn::ItemExternCrate) {
        if item.ident == self.runtime_crate {
            if let Some((_, rename)) = &item.rename {
                self.add_named(rename);
            }
        }
    }
}
