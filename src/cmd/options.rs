// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for gru.

use crate::cmd::profile_store;
use crate::config::Config;
use crate::error::Result;
use crate::profile::{LifecycleState, ProfileStore};

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_inis_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}

/// Display stored profiles with their lifecycle state.
///
/// # Errors
///
/// Returns an error if the profiles root cannot be read.
pub fn run_profiles_command(config: &Config) -> Result<()> {
    let store = profile_store(config)?;
    let lines = format_profiles(&store)?;
    if lines.is_empty() {
        println!("No profiles set up");
    } else {
        for line in lines {
            println!("{line}");
        }
    }
    Ok(())
}

/// `<name> <state>` per stored profile; unreadable records are reported inline.
///
/// # Errors
///
/// Returns an error if the store cannot be listed.
pub fn format_profiles(store: &dyn ProfileStore) -> Result<Vec<String>> {
    let names = store.list()?;
    let width = names.iter().map(String::len).max().unwrap_or(0);
    Ok(names
        .iter()
        .map(|name| match store.load(name) {
            Ok(profile) => format!(
                "{name:<width$}  {}",
                LifecycleState::of(Some(&profile))
            ),
            Err(e) => format!("{name:<width$}  ({e})"),
        })
        .collect())
}
