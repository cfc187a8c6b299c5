// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! zap - embed directories into Rust programs
//!
//! This crate finds calls to `zapped::resource` in a project's sources,
//! reads the directories they name, and renders them as a Rust module that
//! the `zapped` runtime serves at run time.
//!
//! # Overview
//!
//! A project asks for a directory with two string literals, a key and a path
//! relative to the calling file:
//!
//! ```ignore
//! let sql = zapped::resource("SQL", "sql/")?;
//! ```
//!
//! One pass over a project:
//!
//! 1. [`discover_packages`] lists every directory holding `.rs` files.
//! 2. [`scan_package`] parses each file, runs the call-site state machine
//!    and resolves the paths against the package directory.
//! 3. [`merge_scans`] orders the results and binds keys to directories.
//! 4. [`collect`] reads each referenced directory once, however many keys
//!    share it.
//! 5. [`generate`] writes the trees out deepest first so that every parent
//!    links to children that already exist.
//!
//! [`build`] runs steps 2 to 5. Any malformed call or unreadable entry
//! fails the whole pass with every problem listed, and no module is produced.
//!
//! # Example
//!
//! ```yaml
//! # zap.yaml
//! api: zap/v0
//! output: src/zap_embed.rs
//! skip_dirs:
//!   - fixtures
//! ```

pub mod codegen;
pub mod collect;
pub mod config;
pub mod discovery;
pub mod embed;
pub mod error;
pub mod resource;
pub mod scanner;
pub mod source;
pub mod syntax;

pub use codegen::{generate, node_identifier, GenerateOptions};
pub use collect::{collect, DirectoryTree, TreeCollector, TreeMapping};
pub use config::{ApiVersion, Config};
pub use discovery::{discover_packages, Package};
pub use embed::{build, generate_plan, merge_scans, scan_package, EmbedPlan, Generated, PackageScan};
pub use error::{Error, Errors, Result, ScanDiagnostic, ScanErrorKind};
pub use resource::{resolve_paths, CallSite, Resource};
pub use scanner::{scan, ScanOutput};
pub use source::{parse_source, resolve_imports, ImportAlias, SourceFile};

/// Well-known filename for project configuration.
pub const ZAP_CONFIG_FILENAME: &str = "zap.yaml";

/// Crate whose calls are scanned unless configured otherwise.
pub const RUNTIME_CRATE: &str = "zapped";

/// Function of the runtime crate that marks a call site.
pub const ENTRY_POINT: &str = "resource";

/// Other public items of the runtime crate. Paths through these are not
/// call sites and are not reported.
pub const RUNTIME_ITEMS: &[&str] = &[
    "install",
    "installed",
    "Directory",
    "EmbeddedDirectory",
    "LiveDirectory",
    "File",
    "Registry",
    "LiveProvider",
    "ResourceProvider",
    "Error",
    "Result",
    "directory",
    "error",
    "provider",
];

/// Generated artifact, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "src/zap_embed.rs";

/// First line of every generated module.
pub const GENERATED_HEADER: &str = "// @generated by zap. Do not edit.";
