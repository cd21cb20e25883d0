// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gru.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. ~/.gru_local/gru.toml
//! 3. ./gru.toml
//! 4. --ini FILE (repeatable)
//! 5. GRU_* env vars
//! 6. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GRU_PATHS__PROFILES=/srv/gru    → paths.profiles = "/srv/gru"
//! GRU_REMOTE__ROOT_DIR=.sync      → remote.root_dir = ".sync"
//! GRU_SYNC__DEFAULT_FEATURE=main  → sync.default_feature = "main"
//! ```

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::git::validate_feature_name;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, RemoteConfig, SyncConfig, ToolsConfig};

/// Settings file name, both in the profiles root and the working directory.
pub const CONFIG_FILE: &str = "gru.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub paths: PathsConfig,
    pub remote: RemoteConfig,
    pub tools: ToolsConfig,
    pub sync: SyncConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gru_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gru.toml")
    ///     .with_env_prefix("GRU")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// The standard source stack: both `gru.toml` files, then `inis`, then `GRU_*`.
    #[must_use]
    pub fn standard_loader(inis: &[PathBuf]) -> ConfigLoader {
        let mut loader = Self::builder();
        if let Ok(root) = PathsConfig::default_profiles() {
            loader = loader.add_toml_file_optional(root.join(CONFIG_FILE));
        }
        loader = loader.add_toml_file_optional(CONFIG_FILE);
        for ini in inis {
            loader = loader.add_toml_file(ini);
        }
        loader.with_env_prefix("GRU")
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is unknown or a value is invalid.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve()?;

        validate_feature_name(&self.sync.default_feature).map_err(|e| {
            ConfigError::InvalidValue {
                section: "sync".to_string(),
                key: "default_feature".to_string(),
                message: e.to_string(),
            }
        })?;

        for (key, value) in [
            ("git", &self.tools.git),
            ("ssh", &self.tools.ssh),
            ("scp", &self.tools.scp),
            ("svn", &self.tools.svn),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "tools".to_string(),
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                }
                .into());
            }
        }

        if self.remote.root_dir.trim().is_empty() || Path::new(&self.remote.root_dir).is_absolute()
        {
            return Err(ConfigError::InvalidValue {
                section: "remote".to_string(),
                key: "root_dir".to_string(),
                message: "must be a path relative to the remote home".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_remote_options(&mut options);
        self.format_tools_options(&mut options);
        options.insert(
            "sync.default_feature".into(),
            self.sync.default_feature.clone(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "paths.profiles".into(),
            self.paths
                .profiles
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_remote_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("remote.root_dir".into(), self.remote.root_dir.clone());
        options.insert("remote.path_prefix".into(), self.remote.path_prefix.clone());
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.git".into(), self.tools.git.clone());
        options.insert("tools.ssh".into(), self.tools.ssh.clone());
        options.insert("tools.scp".into(), self.tools.scp.clone());
        options.insert("tools.svn".into(), self.tools.svn.clone());
    }
}
