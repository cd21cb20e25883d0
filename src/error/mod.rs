// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!               GruError (~24 bytes)
//!                      |
//!   +--------+--------+--------+--------+-------+
//!   |        |        |        |        |       |
//!   v        v        v        v        v       v
//! Profile  Process   Git   Subsystem  Config  Io/Other
//!   Box      Box     Box      Box      Box    Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Profile    NotFound, NoActiveFeature, Invalid
//!   Process    ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Git        InvalidBranchName, Query
//!   Subsystem  UnknownKind, RevisionUnavailable, UncapturedVariable
//!   Config     ParseError, InvalidValue, ...
//! ```
//!
//! Merge conflicts and SSH/scp failures surface as `Process::NonZeroExit`;
//! the engine does not tell them apart from any other failing tool.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GruError`].
pub type GruResult<T> = std::result::Result<T, GruError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
/// The inner message is part of the display, so variants expose no source.
#[derive(Debug, Error)]
pub enum GruError {
    /// Profile missing or unusable.
    #[error("profile error: {0}")]
    Profile(Box<ProfileError>),

    /// External process failed.
    #[error("process error: {0}")]
    Process(Box<ProcessError>),

    /// Git-level validation or query failed.
    #[error("git error: {0}")]
    Git(Box<GitError>),

    /// Subsystem policy failed.
    #[error("subsystem error: {0}")]
    Subsystem(Box<SubsystemError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl GruError {
    /// Returns the failing process error, if this is one.
    #[must_use]
    pub fn as_process(&self) -> Option<&ProcessError> {
        match self {
            Self::Process(err) => Some(err),
            _ => None,
        }
    }
}

/// Create a [`GruError::Other`] from a message.
pub fn other(message: impl Into<String>) -> GruError {
    GruError::Other(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GruError {
                fn from(err: $error) -> Self {
                    GruError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ProfileError => Profile,
    ProcessError => Process,
    GitError => Git,
    SubsystemError => Subsystem,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Profile Errors ---

/// Profile lookup and validation errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No profile with this name has been set up.
    #[error("profile '{name}' is not set up; invoke \"gru setup\"")]
    NotFound { name: String },

    /// Profile exists but no feature has been checked out yet.
    #[error("profile '{name}' has no active feature; invoke \"gru go <feature>\"")]
    NoActiveFeature { name: String },

    /// Profile record is malformed.
    #[error("invalid profile '{name}': {message}")]
    Invalid { name: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    ///
    /// The display ends with the last lines of captured stderr.
    #[error("\"{command}\" exited with code {code}{}", stderr_tail(.stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// Lines of stderr kept in a [`ProcessError::NonZeroExit`] message.
const STDERR_TAIL_LINES: usize = 12;

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    format!(": {}", lines[start..].join("\n"))
}

impl ProcessError {
    /// Exit code of a failed process, if it ran to completion.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// --- Git Errors ---

/// Git validation and query errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Feature name cannot be used as a branch.
    #[error("invalid feature name '{name}': {reason}")]
    InvalidBranchName { name: String, reason: String },

    /// Read-only repository query failed.
    #[error("failed to query repository {path}: {message}")]
    Query { path: String, message: String },
}

// --- Subsystem Errors ---

/// Subsystem policy errors.
#[derive(Debug, Error)]
pub enum SubsystemError {
    /// Subsystem tag not recognized.
    #[error("subsystem of type \"{0}\" is not found")]
    UnknownKind(String),

    /// A revision query produced no output.
    #[error("\"{command}\" did not report a revision")]
    RevisionUnavailable { command: String },

    /// A commit message referenced a variable no earlier step captured.
    #[error("variable '{0}' was not captured before use")]
    UncapturedVariable(String),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Home directory could not be determined.
    #[error("cannot determine home directory")]
    NoHomeDir,
}
