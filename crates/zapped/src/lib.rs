// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! zapped - runtime access to directories embedded by zap
//!
//! `zap build` scans a project for calls to [`resource`] and writes a module
//! (by default `src/zap_embed.rs`) that rebuilds the referenced directories
//! from byte literals. The application installs the provider from that
//! module once at startup and then looks resources up by key:
//!
//! ```no_run
//! # mod zap_embed {
//! #     pub fn provider() -> Box<dyn zapped::ResourceProvider> {
//! #         Box::new(zapped::Registry::new())
//! #     }
//! # }
//! zapped::install(zap_embed::provider()).expect("installed once");
//!
//! let sql = zapped::resource("SQL", "sql/")?;
//! let schema = sql.file("schema.sql")?;
//! println!("{}", schema.contents_utf8().unwrap_or_default());
//! # Ok::<(), zapped::Error>(())
//! ```
//!
//! Both arguments must be string literals so that `zap` can read them
//! without running the program. In development mode the generated provider
//! reads `relative_path` next to the calling source file instead, so edits
//! show up without regenerating.

use std::panic::Location;

use once_cell::sync::OnceCell;

pub mod directory;
pub mod error;
pub mod provider;

pub use directory::{Directory, EmbeddedDirectory, File, LiveDirectory};
pub use error::{Error, Result};
pub use provider::{LiveProvider, Registry, ResourceProvider};

static PROVIDER: OnceCell<Box<dyn ResourceProvider>> = OnceCell::new();

/// Install the process-wide provider used by [`resource`].
///
/// May be called once; the provider cannot be swapped afterwards.
pub fn install(provider: Box<dyn ResourceProvider>) -> Result<()> {
    PROVIDER
        .set(provider)
        .map_err(|_| Error::AlreadyInstalled)
}

/// The installed provider, if any.
pub fn installed() -> Option<&'static dyn ResourceProvider> {
    PROVIDER.get().map(|provider| provider.as_ref())
}

/// Look up the resource registered under `key`.
///
/// `relative_path` is resolved against the directory of the calling source
/// file in development mode and ignored otherwise.
#[track_caller]
pub fn resource(key: &str, relative_path: &str) -> Result<Directory> {
    let caller = Location::caller();
    let provider = PROVIDER.get().ok_or(Error::NotInstalled)?;
    provider.resource(key, relative_path, caller)
}
