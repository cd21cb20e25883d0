// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> SyncEngine (lifecycle)
//!   setup, push, pull, go, ls, update, profiles, options
//! ```
//!
//! Handlers own the wiring: the system runner, an ssh executor for the
//! profile's host, gix queries and the JSON store under the profiles root.

pub mod feature;
pub mod options;
pub mod setup;
pub mod sync;


use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::git::query::GixBackend;
use crate::lifecycle::SyncEngine;
use crate::profile::{JsonProfileStore, Profile, ProfileStore};
use crate::workflow::{CommandRunner, SshExecutor, SystemRunner};

/// Opens the profile store under the configured profiles root.
///
/// # Errors
///
/// Returns an error if the profiles root cannot be resolved.
pub fn profile_store(config: &Config) -> Result<JsonProfileStore> {
    Ok(JsonProfileStore::new(config.paths.profiles_root()?))
}

/// Builds an engine that reaches `host` over ssh.
///
/// # Errors
///
/// Returns an error if the profiles root cannot be resolved.
pub fn build_engine(config: &Config, host: &str) -> Result<SyncEngine> {
    let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new());
    let remote = SshExecutor::new(runner.clone(), host, &config.tools.ssh, &config.tools.scp);

    Ok(SyncEngine::builder()
        .runner(runner)
        .remote(Arc::new(remote))
        .query(Arc::new(GixBackend))
        .store(Arc::new(profile_store(config)?))
        .remote_config(config.remote.clone())
        .tools(config.tools.clone())
        .sync(config.sync.clone())
        .build())
}

/// Loads `name` and builds an engine for its host.
///
/// # Errors
///
/// Returns `ProfileError::NotFound` if the profile was never set up.
pub fn open_profile(config: &Config, name: &str) -> Result<(SyncEngine, Profile)> {
    let profile = profile_store(config)?.load(name)?;
    let engine = build_engine(config, profile.remote_server())?;
    Ok((engine, profile))
}
