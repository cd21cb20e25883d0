// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote session transport.
//!
//! ```text
//! RemoteSession::open()     ssh <host> pwd                 (home, never cached)
//!   append(...)             operations accumulate
//!   run()
//!     render script         set -e; export PATH; echo + cmd (to stderr) per step
//!     upload                scp <tmp> <host>:<root>/<name>.sh
//!     execute               ssh <host> sh -e <root>/<name>.sh
//! ```
//!
//! A batch costs exactly three round trips however many steps it holds; an
//! empty batch costs no upload or execution.
//!
//! Step echoes share stderr with the commands, so the captured tail of a
//! failed batch names the failing step followed by its own diagnostics.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::{debug, info};

use super::runner::{CommandLine, CommandRunner};
use super::{Operation, Step, Workflow};
use crate::error::{GruResult, Result, other};
use crate::git::WorkTree;

fn quote(word: &str) -> Cow<'_, str> {
    shell_escape::unix::escape(Cow::Borrowed(word))
}

fn quote_path(path: &Path) -> String {
    quote(&path.display().to_string()).into_owned()
}

/// Runs batches of operations on one remote host.
pub trait RemoteExecutor: Send + Sync {
    /// Host identifier as given in the profile.
    fn host(&self) -> &str;

    /// Resolves the remote user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot be reached or reports no directory.
    fn home_dir(&self) -> BoxFuture<'_, GruResult<PathBuf>>;

    /// Removes `dir` with all contents and recreates it empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote command fails.
    fn reset_dir<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GruResult<()>>;

    /// Copies a local file to `remote` on the host.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails.
    fn upload<'a>(&'a self, local: &'a Path, remote: &'a Path) -> BoxFuture<'a, GruResult<()>>;

    /// Runs a previously uploaded script under `sh -e`.
    ///
    /// # Errors
    ///
    /// Returns an error if the script exits non-zero; its message ends with
    /// the script's stderr tail.
    fn execute<'a>(&'a self, script: &'a Path) -> BoxFuture<'a, GruResult<()>>;

    /// URL a local clone uses to reach the repository at `path` on the host.
    fn repository_url(&self, path: &Path) -> String;
}

/// `ssh`/`scp` based executor.
pub struct SshExecutor {
    runner: Arc<dyn CommandRunner>,
    host: String,
    ssh: String,
    scp: String,
}

impl SshExecutor {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        host: impl Into<String>,
        ssh: impl Into<String>,
        scp: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            host: host.into(),
            ssh: ssh.into(),
            scp: scp.into(),
        }
    }

    fn ssh(&self) -> CommandLine {
        CommandLine::new(&self.ssh).arg(&self.host)
    }
}

impl RemoteExecutor for SshExecutor {
    fn host(&self) -> &str {
        &self.host
    }

    fn home_dir(&self) -> BoxFuture<'_, GruResult<PathBuf>> {
        Box::pin(async move {
            let command = self.ssh().arg("pwd").capture();
            let output = self.runner.run(&command).await?;
            let home = output.stdout().trim();
            if home.is_empty() {
                return Err(other(format!(
                    "cannot resolve home directory on '{}'",
                    self.host
                )));
            }
            debug!(host = %self.host, home, "remote home");
            Ok(PathBuf::from(home))
        })
    }

    fn reset_dir<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GruResult<()>> {
        Box::pin(async move {
            let dir = quote_path(dir);
            let command = self
                .ssh()
                .args(["rm", "-rf", dir.as_str(), "&&", "mkdir", "-p", dir.as_str()]);
            self.runner.run(&command).await?;
            Ok(())
        })
    }

    fn upload<'a>(&'a self, local: &'a Path, remote: &'a Path) -> BoxFuture<'a, GruResult<()>> {
        Box::pin(async move {
            let command = CommandLine::new(&self.scp)
                .arg(local.display().to_string())
                .arg(format!("{}:{}", self.host, remote.display()));
            self.runner.run(&command).await?;
            Ok(())
        })
    }

    fn execute<'a>(&'a self, script: &'a Path) -> BoxFuture<'a, GruResult<()>> {
        Box::pin(async move {
            let command = self
                .ssh()
                .args(["sh", "-e"])
                .arg(quote_path(script))
                .capture();
            self.runner.run(&command).await?;
            Ok(())
        })
    }

    fn repository_url(&self, path: &Path) -> String {
        format!("ssh://{}{}", self.host, path.display())
    }
}

/// Where a profile's remote state lives and how its scripts run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLayout {
    /// Directory under the remote home holding every profile root.
    pub root_dir: String,
    /// Profile name; the profile root is `<home>/<root_dir>/<profile>`.
    pub profile: String,
    /// Prepended to `PATH` at the top of every script.
    pub path_prefix: String,
    /// Git program used on the host.
    pub git: String,
}

/// A batch of operations executed on the remote host as one script.
pub struct RemoteSession {
    executor: Arc<dyn RemoteExecutor>,
    tree: WorkTree,
    root: PathBuf,
    name: String,
    path_prefix: String,
    git: String,
    operations: Vec<Operation>,
}

impl RemoteSession {
    /// Opens a session, resolving the remote home directory.
    ///
    /// `name` selects the script file (`<root>/<name>.sh`).
    ///
    /// # Errors
    ///
    /// Returns an error if the remote home cannot be resolved.
    pub async fn open(
        executor: Arc<dyn RemoteExecutor>,
        layout: &RemoteLayout,
        content_dir: &Path,
        name: &str,
    ) -> GruResult<Self> {
        let home = executor.home_dir().await?;
        let root = home.join(&layout.root_dir).join(&layout.profile);
        let tree = WorkTree::remote(executor.host(), &root, content_dir);
        Ok(Self {
            executor,
            tree,
            root,
            name: name.to_string(),
            path_prefix: layout.path_prefix.clone(),
            git: layout.git.clone(),
            operations: Vec::new(),
        })
    }

    /// Per-profile remote root (`<home>/<root_dir>/<profile>`).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location the script is uploaded to.
    #[must_use]
    pub fn script_path(&self) -> PathBuf {
        self.root.join(format!("{}.sh", self.name))
    }

    /// Renders the pending operations without running them.
    #[must_use]
    pub fn script(&self) -> String {
        self.render(&self.operations)
    }

    fn render(&self, operations: &[Operation]) -> String {
        let mut script = String::from("#!/bin/sh\nset -e\n");
        let _ = writeln!(script, "export PATH={}:\"$PATH\"", quote(&self.path_prefix));

        for operation in operations {
            script.push('\n');
            match operation.lower(&self.git, &self.tree) {
                Step::Exec(invocation) => {
                    let line = invocation.to_shell();
                    let _ = writeln!(script, "echo {} >&2", quote(&format!("+ {line}")));
                    let _ = writeln!(script, "{line}");
                }
                Step::Capture { var, invocation } => {
                    let line = format!("{var}=$({})", invocation.to_shell());
                    let _ = writeln!(script, "echo {} >&2", quote(&format!("+ {line}")));
                    let _ = writeln!(script, "{line}");
                    let failure = format!("\"{invocation}\" did not report a revision");
                    let _ = writeln!(
                        script,
                        "[ -n \"${var}\" ] || {{ echo {} >&2; exit 1; }}",
                        quote(&failure)
                    );
                }
            }
        }
        script
    }

    async fn deliver(&self, operations: &[Operation]) -> GruResult<()> {
        let script = self.render(operations);
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(script.as_bytes())?;
        file.flush()?;

        let remote_path = self.script_path();
        info!(
            host = %self.executor.host(),
            script = %remote_path.display(),
            steps = operations.len(),
            "running remote batch"
        );
        self.executor.upload(file.path(), &remote_path).await?;
        self.executor.execute(&remote_path).await
    }
}

impl Workflow for RemoteSession {
    fn tree(&self) -> &WorkTree {
        &self.tree
    }

    fn append(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    fn pending(&self) -> &[Operation] {
        &self.operations
    }

    fn run(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let operations = std::mem::take(&mut self.operations);
            if operations.is_empty() {
                return Ok(());
            }
            self.deliver(&operations).await.map_err(anyhow::Error::from)
        })
    }
}
