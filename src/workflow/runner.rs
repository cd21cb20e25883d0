// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution capability.
//!
//! ```text
//! CommandLine { program, args, capture }
//!      |
//!      v
//! CommandRunner (trait) --> SystemRunner --> ProcessBuilder --> ProcessOutput
//!                      \--> test fakes (record, script replies)
//! ```

use std::fmt;
use std::path::Path;

use futures_util::future::BoxFuture;

use crate::core::process::builder::{ProcessBuilder, ProcessOutput};
use crate::error::GruResult;

/// A fully bound external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    capture: bool,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            capture: false,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Requests stdout to be kept in the returned output.
    #[must_use]
    pub const fn capture(mut self) -> Self {
        self.capture = true;
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub const fn captures(&self) -> bool {
        self.capture
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Runs external commands; a non-zero exit is an error.
pub trait CommandRunner: Send + Sync {
    /// Runs `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the program cannot be found or spawned, or
    /// exits with a non-zero status.
    fn run<'a>(&'a self, command: &'a CommandLine) -> BoxFuture<'a, GruResult<ProcessOutput>>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    env: Vec<(String, String)>,
}

impl SystemRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an environment variable to every spawned command.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    fn builder(&self, command: &CommandLine) -> GruResult<ProcessBuilder> {
        let program = command.program();
        // Bare names go through the PATH lookup cache; paths are used as given.
        let mut builder = if Path::new(program).components().count() > 1 {
            ProcessBuilder::new(program)
        } else {
            ProcessBuilder::which(program)?
        };
        builder = builder.args(command.arguments());
        for (key, value) in &self.env {
            builder = builder.env_var(key, value);
        }
        if command.captures() {
            builder = builder.capture_output();
        } else {
            builder = builder.capture_stderr();
        }
        Ok(builder)
    }
}

impl CommandRunner for SystemRunner {
    fn run<'a>(&'a self, command: &'a CommandLine) -> BoxFuture<'a, GruResult<ProcessOutput>> {
        Box::pin(async move { self.builder(command)?.run().await })
    }
}
