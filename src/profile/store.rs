// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON profile store.
//!
//! ```text
//! <root>/
//!   default/cfg     {"local-dir": ..., "remote-server": ..., ...}
//!   other/cfg
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Profile, ProfileStore, validate_profile_name};
use crate::error::{GruResult, ProfileError};

/// File name of a profile record inside its directory.
pub const RECORD_FILE: &str = "cfg";

/// Stores each profile as `<root>/<name>/cfg`.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    root: PathBuf,
}

impl JsonProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the profile's record.
    #[must_use]
    pub fn profile_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Path of the profile's record.
    #[must_use]
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.profile_dir(name).join(RECORD_FILE)
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self, name: &str) -> GruResult<Profile> {
        validate_profile_name(name)?;
        let path = self.record_path(name);
        if !path.is_file() {
            return Err(ProfileError::NotFound {
                name: name.to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(&path)?;
        let profile: Profile =
            serde_json::from_str(&content).map_err(|e| ProfileError::Invalid {
                name: name.to_string(),
                message: format!("{}: {e}", path.display()),
            })?;
        Ok(profile.with_name(name))
    }

    fn save(&self, profile: &Profile) -> GruResult<()> {
        validate_profile_name(profile.name())?;
        let dir = self.profile_dir(profile.name());
        fs::create_dir_all(&dir)?;

        let mut content =
            serde_json::to_string_pretty(profile).map_err(|e| ProfileError::Invalid {
                name: profile.name().to_string(),
                message: e.to_string(),
            })?;
        content.push('\n');

        let path = dir.join(RECORD_FILE);
        fs::write(&path, content)?;
        debug!(profile = profile.name(), path = %path.display(), "profile saved");
        Ok(())
    }

    fn reset(&self, name: &str) -> GruResult<()> {
        validate_profile_name(name)?;
        let dir = self.profile_dir(name);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
            debug!(profile = name, "profile removed");
        }
        Ok(())
    }

    fn list(&self) -> GruResult<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().join(RECORD_FILE).is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
