// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync profiles.
//!
//! ```text
//! Profile { name, local-dir, remote-server, remote-dir, subsystem, feature }
//!     |                                                           |
//!     | ProfileStore (trait): load / save / reset / list          | LifecycleState
//!     v                                                           v
//! JsonProfileStore  <root>/<name>/cfg            Uninitialized | Mainstream | OnFeature(F)
//! ```

pub mod paths;
pub mod store;


use std::fmt;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{GruResult, ProfileError};
use crate::git::{MAINSTREAM, WorkTree};
use crate::subsystem::SubsystemKind;

pub use store::JsonProfileStore;

/// Profile used when `--profile` is not given.
pub const DEFAULT_PROFILE: &str = "default";

/// One local/remote sync relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "kebab-case")]
pub struct Profile {
    #[serde(skip)]
    #[builder(into)]
    name: String,
    local_dir: PathBuf,
    #[builder(into)]
    remote_server: String,
    remote_dir: PathBuf,
    subsystem: SubsystemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    feature: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    #[must_use]
    pub fn remote_server(&self) -> &str {
        &self.remote_server
    }

    #[must_use]
    pub fn remote_dir(&self) -> &Path {
        &self.remote_dir
    }

    #[must_use]
    pub const fn subsystem(&self) -> SubsystemKind {
        self.subsystem
    }

    /// Feature checked out by the last successful switch.
    #[must_use]
    pub fn feature(&self) -> Option<&str> {
        self.feature.as_deref()
    }

    /// Records the active feature; `None` parks the profile on mainstream.
    pub fn set_feature(&mut self, feature: Option<&str>) {
        self.feature = feature.map(str::to_string);
    }

    /// The active feature, required by push, pull and update.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NoActiveFeature` if no feature was entered yet.
    pub fn active_feature(&self) -> GruResult<&str> {
        self.feature().ok_or_else(|| {
            ProfileError::NoActiveFeature {
                name: self.name.clone(),
            }
            .into()
        })
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.feature
            .as_ref()
            .map_or(LifecycleState::Mainstream, |feature| {
                LifecycleState::OnFeature(feature.clone())
            })
    }

    /// The local working tree, metadata in `<local-dir>/.git`.
    #[must_use]
    pub fn local_tree(&self) -> WorkTree {
        WorkTree::local(&self.local_dir)
    }

    pub(crate) fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

/// Where a profile sits in the feature lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    /// No profile record.
    Uninitialized,
    /// Profile exists but no feature was entered; transient during setup.
    Mainstream,
    /// Both trees sit on this feature branch.
    OnFeature(String),
}

impl LifecycleState {
    /// State of an optional profile record.
    #[must_use]
    pub fn of(profile: Option<&Profile>) -> Self {
        profile.map_or(Self::Uninitialized, Profile::state)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::Mainstream => write!(f, "initialized@{MAINSTREAM}"),
            Self::OnFeature(feature) => write!(f, "on-feature({feature})"),
        }
    }
}

/// Persistence for profile records.
pub trait ProfileStore: Send + Sync {
    /// Loads the profile called `name`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if it was never set up, or
    /// `ProfileError::Invalid` if the record is unreadable.
    fn load(&self, name: &str) -> GruResult<Profile>;

    /// Writes the profile, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, profile: &Profile) -> GruResult<()>;

    /// Removes every trace of the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if existing data cannot be removed.
    fn reset(&self, name: &str) -> GruResult<()>;

    /// Names of all stored profiles, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list(&self) -> GruResult<Vec<String>>;
}

/// Checks that `name` is usable as a directory name on both hosts.
///
/// # Errors
///
/// Returns `ProfileError::Invalid` for empty names, `.`/`..`, or names with
/// path separators or whitespace.
pub fn validate_profile_name(name: &str) -> GruResult<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name is a relative directory")
    } else if name.contains(['/', '\\']) || name.chars().any(char::is_whitespace) {
        Some("name must not contain separators or whitespace")
    } else {
        None
    };
    match reason {
        Some(message) => Err(ProfileError::Invalid {
            name: name.to_string(),
            message: message.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}
