// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gru using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gru [global options] <command>
//! setup --local-dir --remote-server --remote-dir [--subsystem]
//! push [-m TEXT]
//! pull
//! go <feature>        (alias: switch)
//! ls [-a]
//! update
//! profiles
//! options
//! version
//! ```

pub mod global;
pub mod sync;


use crate::cli::global::GlobalOptions;
use crate::cli::sync::{GoArgs, LsArgs, PushArgs, SetupArgs};
use clap::{Parser, Subcommand};

/// Local/remote working copy synchronizer.
#[derive(Debug, Parser)]
#[command(
    name = "gru",
    author,
    version,
    about = "Keeps a local and a remote working copy in sync",
    long_about = "gru-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Both directories are tied together through a bare git repository\n\
                  on the remote host. Work happens on feature branches forked from\n\
                  `mainstream`, which mirrors the remote content (plain files or an\n\
                  SVN working copy).\n\n\
                  Start with `gru setup`, then `gru push` / `gru pull` to move\n\
                  changes, `gru go <feature>` to switch, and `gru update` to pull\n\
                  upstream content into mainstream.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from ~/.gru_local/gru.toml, then ./gru.toml,\n\
                  then every --ini file in order, then GRU_<SECTION>__<KEY>\n\
                  environment variables. Use `gru options` to print the result.\n\
                  Profiles are stored under ~/.gru_local/<profile>/cfg."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files that were loaded, in order.
    Inis,

    /// Lists stored profiles.
    Profiles,

    /// Creates both trees and the sync repository, destroying previous state.
    Setup(SetupArgs),

    /// Pushes local changes to the remote directory.
    Push(PushArgs),

    /// Pulls remote changes to the local directory.
    Pull,

    /// Switches both trees to a feature branch.
    #[command(visible_alias = "switch")]
    Go(GoArgs),

    /// Lists feature branches.
    Ls(LsArgs),

    /// Absorbs upstream content into mainstream and merges it into the active feature.
    Update,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
