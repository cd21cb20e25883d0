// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path normalization for profile directories.
//!
//! ```text
//! local:  ~/work/../src   --> /home/me/src      (local home, cwd)
//! remote: ~/data or data  --> /home/dev/data    (remote home via transport)
//! ```

use std::path::{Component, Path, PathBuf};

use crate::config::paths::expand_home;
use crate::error::GruResult;

/// Removes `.` components and folds `..` into its parent, without touching the filesystem.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !path.is_absolute() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Expands `~`, anchors relative paths at the current directory and normalizes.
///
/// # Errors
///
/// Returns an error if the home or current directory cannot be determined.
pub fn normalize_local(path: &Path) -> GruResult<PathBuf> {
    let expanded = expand_home(path)?;
    let absolute = std::path::absolute(&expanded)?;
    Ok(normalize_lexically(&absolute))
}

/// Resolves a remote path against the remote home directory.
///
/// `~`-prefixed and relative paths are taken relative to `home`.
#[must_use]
pub fn normalize_remote(path: &Path, home: &Path) -> PathBuf {
    let anchored = match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) if path.is_relative() => home.join(path),
        Err(_) => path.to_path_buf(),
    };
    normalize_lexically(&anchored)
}
