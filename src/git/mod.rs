// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git vocabulary.
//!
//! ```text
//!         WorkTree (git-dir, work-tree[, host])
//!               |             |
//!               v             v
//!       command.rs        query.rs
//!       GitCommand        BranchQuery (read)
//!     (write, lowered        |
//!      to Invocations)       v
//!                        GixBackend
//!                        .has_local_branch
//!                        .local/remote_branches
//!                        .has_uncommitted_changes
//! ```
//!
//! Writes are never executed here; they are appended to a workflow and run as
//! external `git` processes (locally or inside a remote script). Reads run
//! in-process through gix and only ever touch the local tree.

pub mod command;
pub mod query;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::GitError;

/// Branch mirroring the authoritative content; root of every feature branch.
pub const MAINSTREAM: &str = "mainstream";

/// Name of the remote every tree uses for the sync repository.
pub const ORIGIN: &str = "origin";

const FEATURE_NAME_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9._/-]*$";

/// Returns `origin/<branch>`.
#[must_use]
pub fn origin(branch: &str) -> String {
    format!("{ORIGIN}/{branch}")
}

/// Validates that a feature name is usable as a branch name.
///
/// # Errors
///
/// Returns `GitError::InvalidBranchName` for names git would reject or that
/// collide with the mainstream branch.
pub fn validate_feature_name(name: &str) -> Result<(), GitError> {
    let invalid = |reason: &str| GitError::InvalidBranchName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name == MAINSTREAM {
        return Err(invalid("reserved for the mainstream branch"));
    }
    let pattern = Regex::new(FEATURE_NAME_PATTERN)
        .map_err(|e| invalid(&format!("failed to compile name pattern: {e}")))?;
    if !pattern.is_match(name) {
        return Err(invalid("only letters, digits, '.', '_', '-' and '/' are allowed"));
    }
    if name.contains("..") || name.contains("//") {
        return Err(invalid("must not contain '..' or '//'"));
    }
    if name.ends_with('/') || name.ends_with('.') || name.ends_with(".lock") {
        return Err(invalid("must not end with '/', '.' or '.lock'"));
    }
    Ok(())
}

/// A git metadata location paired with the content directory it tracks.
///
/// Remote trees keep their metadata under the per-profile remote root rather
/// than inside the content directory, so the content stays free of `.git`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkTree {
    git_dir: PathBuf,
    content_dir: PathBuf,
    host: Option<String>,
}

impl WorkTree {
    /// A local tree whose metadata lives in `<content_dir>/.git`.
    pub fn local(content_dir: impl AsRef<Path>) -> Self {
        let content_dir = content_dir.as_ref().to_path_buf();
        Self {
            git_dir: content_dir.join(".git"),
            content_dir,
            host: None,
        }
    }

    /// A tree on `host` whose metadata lives in `<root>/.git`.
    pub fn remote(host: impl Into<String>, root: &Path, content_dir: impl AsRef<Path>) -> Self {
        Self {
            git_dir: root.join(".git"),
            content_dir: content_dir.as_ref().to_path_buf(),
            host: Some(host.into()),
        }
    }

    #[must_use]
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the `--git-dir`/`--work-tree` arguments addressing this tree.
    #[must_use]
    pub fn location_args(&self) -> [String; 4] {
        [
            "--git-dir".to_string(),
            self.git_dir.display().to_string(),
            "--work-tree".to_string(),
            self.content_dir.display().to_string(),
        ]
    }
}
