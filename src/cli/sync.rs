// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command arguments.

use std::path::PathBuf;

use clap::Args;

use crate::subsystem::SubsystemKind;

/// Arguments for the `setup` command.
#[derive(Debug, Clone, Args)]
pub struct SetupArgs {
    /// Local directory; recreated from the sync repository.
    #[arg(long = "local-dir", value_name = "PATH")]
    pub local_dir: PathBuf,

    /// Remote host as understood by ssh (name, alias or user@host).
    #[arg(long = "remote-server", value_name = "NAME")]
    pub remote_server: String,

    /// Remote directory; relative paths and `~` resolve against the remote home.
    #[arg(long = "remote-dir", value_name = "PATH")]
    pub remote_dir: PathBuf,

    /// What backs the remote directory (files or svn).
    #[arg(long, value_name = "NAME", default_value_t = SubsystemKind::Files)]
    pub subsystem: SubsystemKind,
}

/// Arguments for the `push` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PushArgs {
    /// Appended to the local commit message.
    #[arg(short = 'm', long = "message", value_name = "TEXT")]
    pub message: Option<String>,
}

/// Arguments for the `go` command.
#[derive(Debug, Clone, Args)]
pub struct GoArgs {
    /// Feature branch to switch to; created from mainstream on first use.
    #[arg(value_name = "FEATURE")]
    pub feature: String,
}

/// Arguments for the `ls` command.
#[derive(Debug, Clone, Default, Args)]
pub struct LsArgs {
    /// Also lists mainstream and remote-tracking branches.
    #[arg(short = 'a', long = "all")]
    pub all: bool,
}
