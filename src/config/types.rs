// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, RemoteConfig, ToolsConfig, SyncConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Remote host layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Directory under the remote home holding one root per profile.
    pub root_dir: String,
    /// Prepended to `PATH` in every remote script.
    pub path_prefix: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            root_dir: ".gru_remote".to_string(),
            path_prefix: "/usr/local/bin".to_string(),
        }
    }
}

/// External programs, by name (looked up in PATH) or path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub git: String,
    pub ssh: String,
    pub scp: String,
    /// Used on the remote host only.
    pub svn: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            ssh: "ssh".to_string(),
            scp: "scp".to_string(),
            svn: "svn".to_string(),
        }
    }
}

/// Feature workflow defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Feature entered at the end of setup.
    pub default_feature: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_feature: "noname".to_string(),
        }
    }
}
