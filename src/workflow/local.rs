// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local command sequencer.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::{debug, info};

use super::runner::CommandRunner;
use super::{Operation, Step, Workflow};
use crate::error::{GruError, Result, SubsystemError};
use crate::git::WorkTree;

/// Runs a batch on the local machine, one process per step.
pub struct LocalSequencer {
    tree: WorkTree,
    git: String,
    runner: Arc<dyn CommandRunner>,
    operations: Vec<Operation>,
    vars: BTreeMap<String, String>,
}

impl LocalSequencer {
    pub fn new(tree: WorkTree, git: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            tree,
            git: git.into(),
            runner,
            operations: Vec::new(),
            vars: BTreeMap::new(),
        }
    }

    /// Value captured for `var` by an earlier run, if any.
    #[must_use]
    pub fn captured(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(String::as_str)
    }

    async fn run_steps(&mut self, operations: Vec<Operation>) -> Result<()> {
        let total = operations.len();
        for (index, operation) in operations.iter().enumerate() {
            match operation.lower(&self.git, &self.tree) {
                Step::Exec(invocation) => {
                    let command = invocation.resolve(&self.vars).map_err(GruError::from)?;
                    debug!(step = index + 1, total, cmd = %command, "local");
                    self.runner.run(&command).await?;
                }
                Step::Capture { var, invocation } => {
                    let command = invocation
                        .resolve(&self.vars)
                        .map_err(GruError::from)?
                        .capture();
                    debug!(step = index + 1, total, cmd = %command, var = %var, "capture");
                    let output = self.runner.run(&command).await?;
                    let value = output.stdout().trim();
                    if value.is_empty() {
                        return Err(GruError::from(SubsystemError::RevisionUnavailable {
                            command: command.to_string(),
                        })
                        .into());
                    }
                    self.vars.insert(var, value.to_string());
                }
            }
        }
        Ok(())
    }
}

impl Workflow for LocalSequencer {
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
            info!(
                tree = %self.tree.content_dir().display(),
                steps = operations.len(),
                "running local batch"
            );
            self.run_steps(operations).await
        })
    }
}
