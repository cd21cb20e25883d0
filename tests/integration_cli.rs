// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use gru_rs::cli::global::GlobalOptions;
use gru_rs::cli::{Cli, Command};
use gru_rs::subsystem::SubsystemKind;

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["gru", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["gru", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_inis_takes_repeated_ini_files() {
    let cli = Cli::try_parse_from(["gru", "-i", "a.toml", "--ini", "b.toml", "inis"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Inis)));
    assert_eq!(cli.global.inis.len(), 2);
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["gru"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Setup Command
// =============================================================================

#[test]
fn cli_setup_requires_all_locations() {
    let result = Cli::try_parse_from(["gru", "setup", "--local-dir", "/tmp/L"]);
    assert!(result.is_err());
}

#[test]
fn cli_setup_with_profile() {
    let cli = Cli::try_parse_from([
        "gru",
        "--profile",
        "client",
        "setup",
        "--local-dir",
        "/tmp/L",
        "--remote-server",
        "h",
        "--remote-dir",
        "/tmp/R",
        "--subsystem",
        "files",
    ])
    .unwrap();
    assert_eq!(cli.global.profile, "client");
    let Some(Command::Setup(args)) = cli.command else {
        panic!("expected setup");
    };
    assert_eq!(args.remote_server, "h");
    assert_eq!(args.subsystem, SubsystemKind::Files);
}

// =============================================================================
// Sync Commands
// =============================================================================

#[test]
fn cli_push_without_message() {
    let cli = Cli::try_parse_from(["gru", "push"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Push(ref args)) if args.message.is_none()));
}

#[test]
fn cli_push_long_message() {
    let cli = Cli::try_parse_from(["gru", "push", "--message", "wip"]).unwrap();
    assert!(
        matches!(cli.command, Some(Command::Push(ref args)) if args.message.as_deref() == Some("wip"))
    );
}

#[test]
fn cli_go_requires_feature() {
    assert!(Cli::try_parse_from(["gru", "go"]).is_err());
}

#[test]
fn cli_update_and_pull_take_no_arguments() {
    assert!(matches!(
        Cli::try_parse_from(["gru", "update"]).unwrap().command,
        Some(Command::Update)
    ));
    assert!(Cli::try_parse_from(["gru", "pull", "extra"]).is_err());
}

#[test]
fn cli_ls_defaults_to_features_only() {
    let cli = Cli::try_parse_from(["gru", "ls"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Ls(ref args)) if !args.all));
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_after_subcommand_are_rejected() {
    let result = Cli::try_parse_from(["gru", "pull", "-l", "4"]);
    assert!(result.is_err());
}

#[test]
fn cli_file_log_level() {
    let cli = Cli::try_parse_from(["gru", "--file-log-level", "6", "--log-file", "gru.log", "ls"])
        .unwrap();
    assert_eq!(cli.global.file_log_level, Some(6));
    assert_eq!(cli.global.log_level, None);
    assert_eq!(
        cli.global.log_file.as_deref(),
        Some(std::path::Path::new("gru.log"))
    );
}

#[test]
fn cli_default_global_options() {
    let defaults = GlobalOptions::default();
    let parsed = Cli::try_parse_from(["gru", "ls"]).unwrap().global;
    assert_eq!(parsed.profile, defaults.profile);
    assert_eq!(parsed.inis, defaults.inis);
    assert_eq!(parsed.log_level, defaults.log_level);
}
