// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Setup command implementation.

use tracing::info;

use crate::cli::sync::SetupArgs;
use crate::cmd::build_engine;
use crate::config::Config;
use crate::error::Result;
use crate::profile::{Profile, validate_profile_name};

/// Handler for `gru setup`.
///
/// # Errors
///
/// Returns an error if any setup step fails.
pub async fn run_setup_command(args: &SetupArgs, profile: &str, config: &Config) -> Result<()> {
    validate_profile_name(profile)?;
    let draft = Profile::builder()
        .name(profile)
        .local_dir(args.local_dir.clone())
        .remote_server(args.remote_server.as_str())
        .remote_dir(args.remote_dir.clone())
        .subsystem(args.subsystem)
        .build();

    let engine = build_engine(config, &args.remote_server)?;
    let profile = engine.setup(&draft).await?;

    info!(profile = profile.name(), state = %profile.state(), "setup complete");
    println!(
        "{}: {} <-> {}:{} [{}]",
        profile.name(),
        profile.local_dir().display(),
        profile.remote_server(),
        profile.remote_dir().display(),
        profile.state()
    );
    Ok(())
}
