// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Feature switching and listing.

use crate::cli::sync::{GoArgs, LsArgs};
use crate::cmd::open_profile;
use crate::config::Config;
use crate::error::Result;

/// Handler for `gru go` / `gru switch`.
///
/// # Errors
///
/// Returns an error if the profile is missing, the name is invalid, or a step fails.
pub async fn run_go_command(args: &GoArgs, profile: &str, config: &Config) -> Result<()> {
    let (engine, mut profile) = open_profile(config, profile)?;
    engine.goto_feature(&mut profile, &args.feature).await
}

/// Handler for `gru ls`.
///
/// # Errors
///
/// Returns an error if the profile is missing or the local repository cannot be read.
pub fn run_ls_command(args: &LsArgs, profile: &str, config: &Config) -> Result<()> {
    let (engine, profile) = open_profile(config, profile)?;
    let branches = engine.branches(&profile, args.all)?;
    for line in format_branches(&branches, profile.feature()) {
        println!("{line}");
    }
    Ok(())
}

/// One line per branch, the active one marked with `*`.
#[must_use]
pub fn format_branches(branches: &[String], active: Option<&str>) -> Vec<String> {
    branches
        .iter()
        .map(|name| {
            let marker = if Some(name.as_str()) == active { '*' } else { ' ' };
            format!("{marker} {name}")
        })
        .collect()
}
