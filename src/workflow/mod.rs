// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command sequencing against one working tree.
//!
//! ```text
//!   VersionControlClient (typed ops: init, fetch, checkout, merge, commit, ...)
//!            | append(Operation)
//!            v
//!   Workflow (trait) --------------------------+
//!     |                                        |
//!     v                                        v
//!   LocalSequencer                         RemoteSession
//!   each Step --> CommandRunner            all Steps --> one script
//!   (fail fast, in order)                  scp + ssh sh -e (fail fast)
//! ```
//!
//! A workflow is a batch: operations accumulate until `run()`, execute strictly
//! in append order, and the batch is drained. The first failing step aborts
//! the rest; already applied steps are not rolled back.

pub mod invocation;
pub mod local;
pub mod remote;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;

use crate::error::Result;
use crate::git::WorkTree;
use crate::git::command::GitCommand;
use invocation::{Invocation, Message};

pub use local::LocalSequencer;
pub use remote::{RemoteExecutor, RemoteLayout, RemoteSession, SshExecutor};
pub use runner::{CommandLine, CommandRunner, SystemRunner};

/// One recorded unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// A git command against the workflow's tree.
    Git(GitCommand),
    /// Any other program.
    Run(Invocation),
    /// Runs a program and binds its trimmed stdout to `var`; empty output fails.
    Capture { var: String, invocation: Invocation },
    /// `rm -rf <path>`.
    RemoveDir(PathBuf),
    /// `mkdir -p <path>`.
    MakeDir(PathBuf),
    /// Appends `line` to the file at `path`.
    AppendLine { path: PathBuf, line: String },
}

/// An operation lowered to an executable step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Exec(Invocation),
    Capture { var: String, invocation: Invocation },
}

impl Operation {
    /// Lowers the operation against `tree`, using `git` as the git program.
    #[must_use]
    pub fn lower(&self, git: &str, tree: &WorkTree) -> Step {
        match self {
            Self::Git(command) => Step::Exec(command.invocation(git, tree)),
            Self::Run(invocation) => Step::Exec(invocation.clone()),
            Self::Capture { var, invocation } => Step::Capture {
                var: var.clone(),
                invocation: invocation.clone(),
            },
            Self::RemoveDir(path) => Step::Exec(
                Invocation::new("rm")
                    .arg("-rf")
                    .arg(path.display().to_string()),
            ),
            Self::MakeDir(path) => Step::Exec(
                Invocation::new("mkdir")
                    .arg("-p")
                    .arg(path.display().to_string()),
            ),
            Self::AppendLine { path, line } => Step::Exec(
                Invocation::new("sh")
                    .args(["-c", r#"printf '%s\n' "$1" >> "$2""#, "sh"])
                    .arg(line)
                    .arg(path.display().to_string()),
            ),
        }
    }
}

/// An ordered batch of operations against a fixed working tree.
pub trait Workflow: Send {
    /// The tree every git operation addresses.
    fn tree(&self) -> &WorkTree;

    /// Records an operation at the end of the batch.
    fn append(&mut self, operation: Operation);

    /// Operations recorded since the last run.
    fn pending(&self) -> &[Operation];

    /// Executes and drains the batch, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error; later steps do not run.
    fn run(&mut self) -> BoxFuture<'_, Result<()>>;
}

/// Typed git and filesystem operations over any [`Workflow`].
pub trait VersionControlClient: Workflow {
    fn git(&mut self, command: GitCommand) {
        self.append(Operation::Git(command));
    }

    fn init(&mut self) {
        self.git(GitCommand::Init);
    }

    fn init_bare(&mut self, path: &Path) {
        self.git(GitCommand::InitBare {
            path: path.to_path_buf(),
        });
    }

    fn add_remote(&mut self, name: &str, url: &str) {
        self.git(GitCommand::AddRemote {
            name: name.to_string(),
            url: url.to_string(),
        });
    }

    fn clone_repository(&mut self, url: &str, dest: &Path) {
        self.git(GitCommand::Clone {
            url: url.to_string(),
            dest: dest.to_path_buf(),
        });
    }

    fn fetch_all(&mut self) {
        self.git(GitCommand::FetchAll);
    }

    fn checkout(&mut self, target: &str) {
        self.git(GitCommand::Checkout {
            target: target.to_string(),
        });
    }

    /// Creates or resets `branch` at `start`, optionally tracking it.
    fn switch_to(&mut self, branch: &str, start: Option<&str>, track: bool) {
        self.git(GitCommand::SwitchTo {
            branch: branch.to_string(),
            start: start.map(str::to_string),
            track,
        });
    }

    fn add_all(&mut self) {
        self.git(GitCommand::AddAll);
    }

    fn commit(&mut self, message: Message, allow_empty: bool) {
        self.git(GitCommand::Commit {
            message,
            allow_empty,
        });
    }

    fn push(&mut self) {
        self.git(GitCommand::Push);
    }

    fn push_upstream(&mut self, branch: &str) {
        self.git(GitCommand::PushUpstream {
            branch: branch.to_string(),
        });
    }

    fn pull(&mut self) {
        self.git(GitCommand::Pull);
    }

    fn merge(&mut self, target: &str) {
        self.git(GitCommand::Merge {
            target: target.to_string(),
        });
    }

    fn clean(&mut self) {
        self.git(GitCommand::Clean);
    }

    fn restore_all(&mut self) {
        self.git(GitCommand::RestoreAll);
    }

    fn remove_dir(&mut self, path: &Path) {
        self.append(Operation::RemoveDir(path.to_path_buf()));
    }

    fn make_dir(&mut self, path: &Path) {
        self.append(Operation::MakeDir(path.to_path_buf()));
    }

    fn append_line(&mut self, path: &Path, line: &str) {
        self.append(Operation::AppendLine {
            path: path.to_path_buf(),
            line: line.to_string(),
        });
    }

    fn run_tool(&mut self, invocation: Invocation) {
        self.append(Operation::Run(invocation));
    }

    /// Binds the trimmed stdout of `invocation` to `var` for later messages.
    fn capture(&mut self, var: &str, invocation: Invocation) {
        self.append(Operation::Capture {
            var: var.to_string(),
            invocation,
        });
    }
}

impl<W: Workflow + ?Sized> VersionControlClient for W {}
