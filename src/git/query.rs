// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only branch queries using the gix backend.
//!
//! ```text
//! BranchQuery (trait, injectable) --> GixBackend --> .git/ (no subprocess)
//! ```

use std::path::Path;

use crate::error::{GitError, GruResult};

/// Read-only queries against a local repository.
pub trait BranchQuery: Send + Sync {
    /// Returns true if `refs/heads/<branch>` exists.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or read.
    fn has_local_branch(&self, repo: &Path, branch: &str) -> GruResult<bool>;

    /// Short names of all local branches, sorted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or read.
    fn local_branches(&self, repo: &Path) -> GruResult<Vec<String>>;

    /// Short names (`origin/<name>`) of all remote-tracking branches, sorted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or read.
    fn remote_branches(&self, repo: &Path) -> GruResult<Vec<String>>;

    /// Check for uncommitted changes (staged, unstaged, or untracked files).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or the status check fails.
    fn has_uncommitted_changes(&self, repo: &Path) -> GruResult<bool>;
}

/// Pure Rust query backend using gix.
#[derive(Debug, Clone, Copy, Default)]
pub struct GixBackend;

fn query_error(repo: &Path, err: impl std::fmt::Display) -> GitError {
    GitError::Query {
        path: repo.display().to_string(),
        message: err.to_string(),
    }
}

fn open(repo: &Path) -> GruResult<gix::Repository> {
    gix::open(repo).map_err(|e| query_error(repo, e).into())
}

impl BranchQuery for GixBackend {
    fn has_local_branch(&self, repo: &Path, branch: &str) -> GruResult<bool> {
        let repository = open(repo)?;
        let found = repository
            .try_find_reference(format!("refs/heads/{branch}").as_str())
            .map_err(|e| query_error(repo, e))?;
        Ok(found.is_some())
    }

    fn local_branches(&self, repo: &Path) -> GruResult<Vec<String>> {
        let repository = open(repo)?;
        let platform = repository.references().map_err(|e| query_error(repo, e))?;
        let mut names = Vec::new();
        for reference in platform.local_branches().map_err(|e| query_error(repo, e))? {
            let reference = reference.map_err(|e| query_error(repo, e))?;
            names.push(reference.name().shorten().to_string());
        }
        names.sort();
        Ok(names)
    }

    fn remote_branches(&self, repo: &Path) -> GruResult<Vec<String>> {
        let repository = open(repo)?;
        let platform = repository.references().map_err(|e| query_error(repo, e))?;
        let mut names = Vec::new();
        for reference in platform.remote_branches().map_err(|e| query_error(repo, e))? {
            let reference = reference.map_err(|e| query_error(repo, e))?;
            let name = reference.name().shorten().to_string();
            // origin/HEAD is a symbolic pointer, not a branch
            if !name.ends_with("/HEAD") {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn has_uncommitted_changes(&self, repo: &Path) -> GruResult<bool> {
        use gix::status::UntrackedFiles;

        let repository = open(repo)?;
        let has_changes = repository
            .status(gix::progress::Discard)
            .map_err(|e| query_error(repo, e))?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .map_err(|e| query_error(repo, e))?
            .next()
            .is_some();

        Ok(has_changes)
    }
}
