// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test helpers: a command runner that records instead of spawning.

use std::sync::Mutex;

use futures_util::future::BoxFuture;

use super::runner::{CommandLine, CommandRunner};
use crate::core::process::builder::ProcessOutput;
use crate::error::{GruResult, ProcessError};

/// Home directory every recorded `ssh <host> pwd` reports.
pub(crate) const REMOTE_HOME: &str = "/home/dev";

/// Records every command, keeps uploaded scripts, and fails on request.
pub(crate) struct RecordingRunner {
    commands: Mutex<Vec<String>>,
    scripts: Mutex<Vec<String>>,
    failures: Vec<String>,
    replies: Vec<(String, String)>,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            scripts: Mutex::new(Vec::new()),
            failures: Vec::new(),
            replies: vec![(" pwd".to_string(), REMOTE_HOME.to_string())],
        }
    }

    /// Commands whose line contains `pattern` exit with code 1.
    pub(crate) fn fail_on(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }

    /// Commands whose line contains `pattern` print `stdout`.
    pub(crate) fn reply(mut self, pattern: &str, stdout: &str) -> Self {
        self.replies.push((pattern.to_string(), stdout.to_string()));
        self
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.commands.lock().expect("commands lock").clone()
    }

    /// Contents of every file passed to `scp`, in upload order.
    pub(crate) fn scripts(&self) -> Vec<String> {
        self.scripts.lock().expect("scripts lock").clone()
    }

    /// Number of `ssh`/`scp` invocations, i.e. network round trips.
    pub(crate) fn round_trips(&self) -> usize {
        self.commands()
            .iter()
            .filter(|line| line.starts_with("ssh ") || line.starts_with("scp "))
            .count()
    }
}

impl CommandRunner for RecordingRunner {
    fn run<'a>(&'a self, command: &'a CommandLine) -> BoxFuture<'a, GruResult<ProcessOutput>> {
        Box::pin(async move {
            let line = command.to_string();
            self.commands
                .lock()
                .expect("commands lock")
                .push(line.clone());

            if command.program() == "scp"
                && let Some(source) = command.arguments().first()
            {
                let script = std::fs::read_to_string(source)?;
                self.scripts.lock().expect("scripts lock").push(script);
            }

            if self.failures.iter().any(|pattern| line.contains(pattern)) {
                return Err(ProcessError::NonZeroExit {
                    command: line,
                    code: 1,
                    stderr: "simulated failure".to_string(),
                }
                .into());
            }

            let stdout = self
                .replies
                .iter()
                .rev()
                .find(|(pattern, _)| line.contains(pattern.as_str()))
                .map(|(_, stdout)| stdout.clone())
                .unwrap_or_default();
            Ok(ProcessOutput::new(line, 0, stdout, ""))
        })
    }
}
