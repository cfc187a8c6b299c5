// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Rendering collected trees as a Rust module.
//!
//! Every directory becomes a local variable named after the SHA-256 of its
//! path. Deeper directories are emitted first so that a parent only ever
//! links to variables that already exist, which turns the shared tree into
//! flat straight-line code.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;
use sha2::{Digest, Sha256};

use crate::collect::{DirectoryTree, TreeMapping};
use crate::{Error, Result, GENERATED_HEADER};

#[cfg(test)]
#[path = "./codegen_test.rs"]
mod codegen_test;

/// Inputs to [`generate`] besides the trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Crate the generated module refers to.
    pub runtime_crate: String,
    /// Emit a provider that reads from disk instead of embedded bytes.
    pub development_mode: bool,
    /// Root the development provider resolves caller locations under. A
    /// member crate works as well as the workspace root.
    pub source_root: PathBuf,
}

/// Variable name used for the tree at `path`.
pub fn node_identifier(path: &Path) -> String {
    let digest = Sha256::digest(path.as_os_str().as_encoded_bytes());
    format!("_{digest:x}")
}

fn node_ident(path: &Path) -> Ident {
    Ident::new(&node_identifier(path), Span::call_site())
}

/// Trees deepest first, ties in path order.
pub fn emission_order(trees: &TreeMapping) -> Vec<&DirectoryTree> {
    let mut ordered = trees.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| {
        b.depth()
            .cmp(&a.depth())
            .then_with(|| a.path.cmp(&b.path))
    });
    ordered
}

/// Render `trees` and the `key -> root path` table as formatted Rust
/// source.
///
/// The output depends only on the arguments: the same input always gives
/// the same bytes.
pub fn generate(
    trees: &TreeMapping,
    registry: &BTreeMap<String, PathBuf>,
    options: &GenerateOptions,
) -> Result<String> {
    let runtime = syn::parse_str::<Ident>(&options.runtime_crate).map_err(|err| {
        Error::Generation(format!(
            "{:?} is not a valid crate name: {err}",
            options.runtime_crate
        ))
    })?;

    let mut statements = Vec::with_capacity(trees.len());
    let mut emitted = BTreeSet::new();
    for tree in emission_order(trees) {
        statements.push(node_statements(tree, &runtime, &emitted)?);
        emitted.insert(tree.path.as_path());
    }

    let mut inserts = Vec::with_capacity(registry.len());
    for (key, root) in registry {
        if !emitted.contains(root.as_path()) {
            return Err(Error::Generation(format!(
                "resource {key:?} refers to {root:?}, which was not collected"
            )));
        }
        let ident = node_ident(root);
        inserts.push(quote! {
            registry.insert(#key, ::std::sync::Arc::clone(&#ident));
        });
    }

    let development_mode = options.development_mode;
    let provider = if development_mode {
        let root = options.source_root.to_str().ok_or_else(|| {
            Error::Generation(format!(
                "source root is not valid UTF-8: {:?}",
                options.source_root
            ))
        })?;
        quote! { ::std::boxed::Box::new(::#runtime::LiveProvider::new(#root)) }
    } else {
        quote! { ::std::boxed::Box::new(registry()) }
    };

    let tokens = quote! {
        #![allow(unused_mut, clippy::all)]

        /// Whether [`provider`] reads resources from disk.
        pub const DEVELOPMENT_MODE: bool = #development_mode;

        /// Every embedded resource by key.
        pub fn registry() -> ::#runtime::Registry {
            #(#statements)*
            let mut registry = ::#runtime::Registry::new();
            #(#inserts)*
            registry
        }

        /// The provider to pass to `install` at startup.
        pub fn provider() -> ::std::boxed::Box<dyn ::#runtime::ResourceProvider> {
            #provider
        }
    };

    let file = syn::parse2::<syn::File>(tokens).map_err(|err| Error::Generation(err.to_string()))?;
    let source = format!("{GENERATED_HEADER}\n{}", prettyplease::unparse(&file));
    tracing::debug!(
        trees = trees.len(),
        resources = registry.len(),
        bytes = source.len(),
        "generated source"
    );
    Ok(source)
}

fn node_statements(
    tree: &DirectoryTree,
    runtime: &Ident,
    emitted: &BTreeSet<&Path>,
) -> Result<TokenStream> {
    let ident = node_ident(&tree.path);

    let mut links = Vec::with_capacity(tree.subdirectories.len());
    for child in &tree.subdirectories {
        if !emitted.contains(child.as_path()) {
            return Err(Error::MissingReference {
                parent: tree.path.clone(),
                child: child.clone(),
            });
        }
        let name = child.file_name().and_then(OsStr::to_str).ok_or_else(|| {
            Error::Generation(format!("cannot name {child:?} inside {:?}", tree.path))
        })?;
        let child_ident = node_ident(child);
        links.push(quote! {
            #ident.insert_directory(#name, ::std::sync::Arc::clone(&#child_ident));
        });
    }

    let files = tree.files.iter().map(|(name, contents)| {
        let contents = Literal::byte_string(contents);
        quote! {
            #ident.insert_file(#name, #contents);
        }
    });

    Ok(quote! {
        let mut #ident = ::#runtime::EmbeddedDirectory::new();
        #(#links)*
        #(#files)*
        let #ident = ::std::sync::Arc::new(#ident);
    })
}
