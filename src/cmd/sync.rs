// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Push, pull and update commands.

use crate::cli::sync::PushArgs;
use crate::cmd::open_profile;
use crate::config::Config;
use crate::error::Result;

/// Handler for `gru push`.
///
/// # Errors
///
/// Returns an error if the profile is missing or a step fails.
pub async fn run_push_command(args: &PushArgs, profile: &str, config: &Config) -> Result<()> {
    let (engine, profile) = open_profile(config, profile)?;
    engine.push(&profile, args.message.as_deref()).await
}

/// Handler for `gru pull`.
///
/// # Errors
///
/// Returns an error if the profile is missing or a step fails.
pub async fn run_pull_command(profile: &str, config: &Config) -> Result<()> {
    let (engine, profile) = open_profile(config, profile)?;
    engine.pull(&profile).await
}

/// Handler for `gru update`.
///
/// # Errors
///
/// Returns an error if the profile is missing or a step fails.
pub async fn run_update_command(profile: &str, config: &Config) -> Result<()> {
    let (engine, mut profile) = open_profile(config, profile)?;
    engine.update_mainstream(&mut profile).await
}
