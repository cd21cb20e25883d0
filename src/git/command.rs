// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed git write operations.
//!
//! ```text
//! GitCommand --invocation(git, tree)--> Invocation
//!   git --git-dir <tree.git_dir> --work-tree <tree.content_dir> <subcommand...>
//!
//! InitBare and Clone address a path of their own and skip the location args.
//! ```

use std::path::PathBuf;

use super::{MAINSTREAM, ORIGIN, WorkTree};
use crate::workflow::invocation::{Invocation, Message};

/// Every git operation the sync engine issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCommand {
    /// `init --initial-branch=mainstream` for the tree itself.
    Init,
    /// `init --bare` of the sync repository at `path`.
    InitBare { path: PathBuf },
    /// `remote add <name> <url>`.
    AddRemote { name: String, url: String },
    /// `clone <url> <dest>`.
    Clone { url: String, dest: PathBuf },
    /// `fetch --all`.
    FetchAll,
    /// `checkout <target>`.
    Checkout { target: String },
    /// `checkout [--track] -B <branch> [<start>]`: create or reset a branch.
    SwitchTo {
        branch: String,
        start: Option<String>,
        track: bool,
    },
    /// `add -A`.
    AddAll,
    /// `commit [--allow-empty] -m <message>`.
    Commit { message: Message, allow_empty: bool },
    /// `push`.
    Push,
    /// `push --set-upstream origin <branch>`.
    PushUpstream { branch: String },
    /// `pull --no-rebase --no-edit`.
    Pull,
    /// `merge --no-ff --no-edit <target>`.
    Merge { target: String },
    /// `clean -fd`.
    Clean,
    /// `reset --hard`: drop every tracked modification.
    RestoreAll,
}

impl GitCommand {
    /// Returns true if the command addresses the tree via `--git-dir`/`--work-tree`.
    #[must_use]
    pub const fn uses_location(&self) -> bool {
        !matches!(self, Self::InitBare { .. } | Self::Clone { .. })
    }

    /// Lowers the command into an invocation of `git` against `tree`.
    #[must_use]
    pub fn invocation(&self, git: &str, tree: &WorkTree) -> Invocation {
        let mut invocation = Invocation::new(git);
        if self.uses_location() {
            invocation = invocation.args(tree.location_args());
        }

        match self {
            Self::Init => invocation
                .arg("init")
                .arg(format!("--initial-branch={MAINSTREAM}")),
            Self::InitBare { path } => invocation
                .args(["init", "--bare"])
                .arg(format!("--initial-branch={MAINSTREAM}"))
                .arg(path.display().to_string()),
            Self::AddRemote { name, url } => invocation.args(["remote", "add"]).args([name, url]),
            Self::Clone { url, dest } => invocation
                .args(["clone", url.as_str()])
                .arg(dest.display().to_string()),
            Self::FetchAll => invocation.args(["fetch", "--all"]),
            Self::Checkout { target } => invocation.arg("checkout").arg(target),
            Self::SwitchTo {
                branch,
                start,
                track,
            } => {
                let mut invocation = invocation.arg("checkout");
                if *track {
                    invocation = invocation.arg("--track");
                }
                invocation = invocation.args(["-B", branch.as_str()]);
                match start {
                    Some(start) => invocation.arg(start),
                    None => invocation,
                }
            }
            Self::AddAll => invocation.args(["add", "-A"]),
            Self::Commit {
                message,
                allow_empty,
            } => {
                let mut invocation = invocation.arg("commit");
                if *allow_empty {
                    invocation = invocation.arg("--allow-empty");
                }
                invocation.arg("-m").message(message.clone())
            }
            Self::Push => invocation.arg("push"),
            Self::PushUpstream { branch } => invocation
                .args(["push", "--set-upstream", ORIGIN])
                .arg(branch),
            Self::Pull => invocation.args(["pull", "--no-rebase", "--no-edit"]),
            Self::Merge { target } => invocation
                .args(["merge", "--no-ff", "--no-edit"])
                .arg(target),
            Self::Clean => invocation.args(["clean", "-fd"]),
            Self::RestoreAll => invocation.args(["reset", "--hard"]),
        }
    }
}
