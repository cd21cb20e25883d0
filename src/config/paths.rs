// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! ~/.gru_local/          (profiles root)
//!   gru.toml             (optional settings)
//!   <profile>/cfg        (one JSON record per profile)
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Name of the profiles root under the home directory.
pub const DEFAULT_PROFILES_DIR: &str = ".gru_local";

/// Local paths configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding every profile (default: `~/.gru_local`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<PathBuf>,
}

impl PathsConfig {
    /// Default profiles root, `~/.gru_local`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if the home directory is unknown.
    pub fn default_profiles() -> std::result::Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_PROFILES_DIR))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Fills in unset paths and expands a leading `~`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is needed but unknown.
    pub fn resolve(&mut self) -> Result<()> {
        let profiles = match self.profiles.take() {
            Some(path) => expand_home(&path)?,
            None => Self::default_profiles()?,
        };
        self.profiles = Some(profiles);
        Ok(())
    }

    /// The profiles root; call [`PathsConfig::resolve`] first.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is unset and no home directory is known.
    pub fn profiles_root(&self) -> Result<PathBuf> {
        match &self.profiles {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::default_profiles()?),
        }
    }
}

/// Expands a leading `~` against the local home directory.
///
/// # Errors
///
/// Returns `ConfigError::NoHomeDir` if the path starts with `~` and the home
/// directory is unknown.
pub fn expand_home(path: &Path) -> std::result::Result<PathBuf, ConfigError> {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or(ConfigError::NoHomeDir),
        Err(_) => Ok(path.to_path_buf()),
    }
}
