// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Project configuration loaded from zap.yaml.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_OUTPUT, RUNTIME_CRATE, ZAP_CONFIG_FILENAME};

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

/// API version for config files.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum ApiVersion {
    #[default]
    #[serde(rename = "zap/v0")]
    V0,
}

/// Helper for two-stage deserialization to determine API version first.
#[derive(Deserialize)]
struct ApiVersionMapping {
    #[serde(default)]
    api: ApiVersion,
}

/// Settings for one project, from `zap.yaml` or defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// API version identifier.
    #[serde(default)]
    pub api: ApiVersion,

    /// Name the runtime crate is known by in this project.
    /// Differs from `zapped` when the dependency is renamed in Cargo.toml.
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Generated artifact, relative to the project root.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Extra directory names skipped while discovering source files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_dirs: Vec<String>,

    /// Let a later call rebind a key to a different directory instead of
    /// reporting it.
    #[serde(default)]
    pub allow_duplicate_keys: bool,
}

fn default_runtime_crate() -> String {
    RUNTIME_CRATE.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiVersion::default(),
            runtime_crate: default_runtime_crate(),
            output: default_output(),
            skip_dirs: Vec::new(),
            allow_duplicate_keys: false,
        }
    }
}

impl Config {
    /// Parse config from YAML string.
    pub fn from_yaml<S: Into<String>>(yaml: S) -> crate::Result<Self> {
        let yaml = yaml.into();

        // Stage 1: Parse to get API version
        let value: serde_yaml::Value =
            serde_yaml::from_str(&yaml).map_err(|e| crate::Error::InvalidYaml {
                error: e,
                yaml_content: yaml.clone(),
            })?;

        // An empty document is an empty mapping.
        let value = match value {
            serde_yaml::Value::Null => serde_yaml::Value::Mapping(Default::default()),
            value => value,
        };

        let with_version: ApiVersionMapping =
            serde_yaml::from_value(value.clone()).map_err(|e| crate::Error::InvalidYaml {
                error: e,
                yaml_content: yaml.clone(),
            })?;

        // Stage 2: Deserialize based on version
        match with_version.api {
            ApiVersion::V0 => serde_yaml::from_value(value).map_err(|e| {
                crate::Error::InvalidYaml {
                    error: e,
                    yaml_content: yaml,
                }
            }),
        }
    }

    /// Load config from file path.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| crate::Error::ReadFailed {
            path: path.to_path_buf(),
            error: e,
        })?;

        Self::from_yaml(yaml)
    }

    /// Load `zap.yaml` from the project root, falling back to defaults when
    /// the project has none.
    pub fn discover<P: AsRef<Path>>(root: P) -> crate::Result<Self> {
        let path = root.as_ref().join(ZAP_CONFIG_FILENAME);
        if path.is_file() {
            tracing::debug!(?path, "loading config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// File name of the generated artifact. Discovery and collection both
    /// skip it so a previous run never feeds into the next one.
    pub fn output_file_name(&self) -> Option<&std::ffi::OsStr> {
        self.output.file_name()
    }

    /// Entry names the collector never embeds.
    pub fn collector_skips(&self) -> BTreeSet<OsString> {
        let mut skip: BTreeSet<OsString> = [OsString::from(".git")].into();
        if let Some(name) = self.output_file_name() {
            skip.insert(name.to_os_string());
        }
        skip
    }

    /// Absolute path of the generated artifact for a project.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            root.join(&self.output)
        }
    }
}
