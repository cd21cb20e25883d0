// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Feature lifecycle.
//!
//! ```text
//!                 setup
//! uninitialized -------> initialized@mainstream --goto(default)--> on-feature(default)
//!
//! on-feature(F) --goto(G)-->  on-feature(G)     fresh G: branch from origin/mainstream
//!                                               known G: discard, checkout, merge mainstream
//! on-feature(F) --push-->     on-feature(F)     local commit + push, then remote pull
//! on-feature(F) --pull-->     on-feature(F)     remote commit + push, then local pull
//! on-feature(F) --update-->   on-feature(F)     remote: commit drift on F, mainstream,
//!                                               absorb, commit, push; local pull;
//!                                               then goto(F)
//! ```
//!
//! Every transition is a sequence of batches; each batch is fail fast and the
//! first failing batch aborts the transition. Nothing is rolled back. The
//! profile's active feature is saved only after a switch completes.


use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use bon::Builder;
use chrono::{DateTime, Local};
use tracing::{info, instrument, warn};

use crate::config::types::{RemoteConfig, SyncConfig, ToolsConfig};
use crate::error::{GruError, GruResult, Result};
use crate::git::query::BranchQuery;
use crate::git::{MAINSTREAM, ORIGIN, origin, validate_feature_name};
use crate::profile::paths::{normalize_local, normalize_remote};
use crate::profile::{Profile, ProfileStore};
use crate::subsystem::Subsystem;
use crate::workflow::invocation::Message;
use crate::workflow::{
    CommandRunner, LocalSequencer, RemoteExecutor, RemoteLayout, RemoteSession,
    VersionControlClient, Workflow,
};

/// Directory under the remote profile root holding the bare sync repository.
pub const SYNC_REPOSITORY_DIR: &str = "media";

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

fn now() -> DateTime<Local> {
    Local::now()
}

/// Drives local and remote trees through the feature lifecycle.
#[derive(Builder)]
pub struct SyncEngine {
    /// Runs local steps.
    runner: Arc<dyn CommandRunner>,
    /// Reaches the profile's remote host.
    remote: Arc<dyn RemoteExecutor>,
    /// Inspects the local repository.
    query: Arc<dyn BranchQuery>,
    store: Arc<dyn ProfileStore>,
    #[builder(default)]
    remote_config: RemoteConfig,
    #[builder(default)]
    tools: ToolsConfig,
    #[builder(default)]
    sync: SyncConfig,
    /// Source of local commit timestamps.
    #[builder(default = now as fn() -> DateTime<Local>)]
    clock: fn() -> DateTime<Local>,
}

impl SyncEngine {
    /// Loads a stored profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if the profile was never set up.
    pub fn load(&self, name: &str) -> GruResult<Profile> {
        self.store.load(name)
    }

    fn subsystem(&self, profile: &Profile) -> Box<dyn Subsystem> {
        profile.subsystem().policy(&self.tools)
    }

    fn local(&self, profile: &Profile) -> LocalSequencer {
        LocalSequencer::new(profile.local_tree(), &self.tools.git, self.runner.clone())
    }

    async fn remote_session(&self, profile: &Profile, name: &str) -> GruResult<RemoteSession> {
        let layout = RemoteLayout {
            root_dir: self.remote_config.root_dir.clone(),
            profile: profile.name().to_string(),
            path_prefix: self.remote_config.path_prefix.clone(),
            git: self.tools.git.clone(),
        };
        RemoteSession::open(self.remote.clone(), &layout, profile.remote_dir(), name).await
    }

    /// Builds the sync repository and both trees from scratch, then enters
    /// the default feature.
    ///
    /// Any previous state of the profile is destroyed first. Directories in
    /// `draft` are normalized: the local one against the local home and
    /// current directory, the remote one against the remote home.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error; the profile is left on
    /// mainstream (no active feature) if the switch into the default feature fails.
    #[instrument(skip_all, fields(profile = %draft.name(), host = %draft.remote_server()))]
    pub async fn setup(&self, draft: &Profile) -> Result<Profile> {
        let home = self.remote.home_dir().await?;
        let mut profile = Profile::builder()
            .name(draft.name())
            .local_dir(normalize_local(draft.local_dir())?)
            .remote_server(draft.remote_server())
            .remote_dir(normalize_remote(draft.remote_dir(), &home))
            .subsystem(draft.subsystem())
            .build();

        self.store.reset(profile.name())?;
        self.store.save(&profile)?;
        info!(
            local = %profile.local_dir().display(),
            remote = %profile.remote_dir().display(),
            subsystem = %profile.subsystem(),
            "profile saved"
        );

        let subsystem = self.subsystem(&profile);
        let mut remote = self.remote_session(&profile, "setup").await?;
        let root = remote.root().to_path_buf();
        let repository = root.join(SYNC_REPOSITORY_DIR);
        let repository_arg = repository.display().to_string();

        self.remote
            .reset_dir(&root)
            .await
            .context("failed to reset the remote root")?;

        remote.make_dir(&repository);
        remote.init_bare(&repository);
        remote.init();
        let patterns = subsystem.exclude_patterns();
        if !patterns.is_empty() {
            let info_dir = remote.tree().git_dir().join("info");
            remote.make_dir(&info_dir);
            for pattern in patterns {
                remote.append_line(&info_dir.join("exclude"), pattern);
            }
        }
        remote.add_remote(ORIGIN, &repository_arg);
        remote.fetch_all();
        remote.add_all();
        let message = subsystem.commit_message(&mut remote);
        remote.commit(Message::prefixed("[remote] ", message), true);
        remote.push_upstream(MAINSTREAM);
        remote.run().await?;

        let url = self.remote.repository_url(&repository);
        let mut local = self.local(&profile);
        local.remove_dir(profile.local_dir());
        local.clone_repository(&url, profile.local_dir());
        local.fetch_all();
        local.run().await?;

        let feature = self.sync.default_feature.clone();
        self.goto_feature(&mut profile, &feature).await?;
        Ok(profile)
    }

    /// Switches both trees to `feature`.
    ///
    /// A feature without a local branch is branched from `origin/mainstream`.
    /// For a known feature the working tree is discarded first, so no edit
    /// can block the checkout, then the latest mainstream is merged in. The
    /// active feature is saved last.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid names, failing steps or merge conflicts.
    #[instrument(skip(self, profile), fields(profile = %profile.name()))]
    pub async fn goto_feature(&self, profile: &mut Profile, feature: &str) -> Result<()> {
        validate_feature_name(feature).map_err(GruError::from)?;
        let local_dir = profile.local_dir().to_path_buf();
        let visited = self.query.has_local_branch(&local_dir, feature)?;

        let mut local = self.local(profile);
        local.fetch_all();
        if visited {
            if self.query.has_uncommitted_changes(&local_dir)? {
                warn!(
                    tree = %local_dir.display(),
                    "uncommitted local changes will be discarded"
                );
            }
            local.restore_all();
            local.clean();
            local.checkout(feature);
            local.merge(&origin(MAINSTREAM));
        } else {
            info!("branching fresh feature from {}", origin(MAINSTREAM));
            local.switch_to(feature, Some(&origin(MAINSTREAM)), false);
        }
        local.push_upstream(feature);
        local.run().await?;

        let mut remote = self.remote_session(profile, "go").await?;
        remote.fetch_all();
        remote.switch_to(feature, Some(&origin(feature)), true);
        remote.clean();
        remote.restore_all();
        remote.run().await?;

        profile.set_feature(Some(feature));
        self.store.save(profile)?;
        info!(feature, "switched");
        Ok(())
    }

    /// Records local edits and delivers them to the remote tree.
    ///
    /// # Errors
    ///
    /// Returns an error if no feature is active or a step fails.
    #[instrument(skip(self, profile), fields(profile = %profile.name(), feature = profile.feature()))]
    pub async fn push(&self, profile: &Profile, message: Option<&str>) -> Result<()> {
        let feature = profile.active_feature()?;

        let mut local = self.local(profile);
        local.checkout(feature);
        local.add_all();
        local.commit(Message::literal(self.local_commit_message(message)), true);
        local.push();
        local.run().await?;

        let mut remote = self.remote_session(profile, "push").await?;
        remote.pull();
        remote.run().await?;
        Ok(())
    }

    /// Records remote drift and brings it to the local tree.
    ///
    /// # Errors
    ///
    /// Returns an error if no feature is active or a step fails.
    #[instrument(skip(self, profile), fields(profile = %profile.name(), feature = profile.feature()))]
    pub async fn pull(&self, profile: &Profile) -> Result<()> {
        profile.active_feature()?;

        let mut remote = self.remote_session(profile, "pull").await?;
        record_drift(&mut remote, profile);
        remote.run().await?;

        let mut local = self.local(profile);
        local.pull();
        local.run().await?;
        Ok(())
    }

    /// Absorbs upstream content into mainstream on the remote host, then
    /// merges it back into the active feature.
    ///
    /// Uncommitted remote edits are first recorded on the feature, as
    /// [`pull`](Self::pull) does, so they never reach mainstream.
    ///
    /// # Errors
    ///
    /// Returns an error if no feature is active or a step fails.
    #[instrument(skip(self, profile), fields(profile = %profile.name(), feature = profile.feature()))]
    pub async fn update_mainstream(&self, profile: &mut Profile) -> Result<()> {
        let feature = profile.active_feature()?.to_string();
        let subsystem = self.subsystem(profile);

        let mut remote = self.remote_session(profile, "update").await?;
        record_drift(&mut remote, profile);
        remote.fetch_all();
        remote.switch_to(MAINSTREAM, Some(&origin(MAINSTREAM)), true);
        subsystem.absorb_upstream(&mut remote);
        remote.add_all();
        let message = subsystem.commit_message(&mut remote);
        remote.commit(Message::prefixed("[remote] ", message), true);
        remote.push();
        remote.run().await?;

        // The feature gained the drift commit; take it before switching back.
        let mut local = self.local(profile);
        local.pull();
        local.run().await?;

        self.goto_feature(profile, &feature).await
    }

    /// Local branch names; with `all`, mainstream and remote-tracking branches too.
    ///
    /// # Errors
    ///
    /// Returns an error if the local repository cannot be read.
    pub fn branches(&self, profile: &Profile, all: bool) -> GruResult<Vec<String>> {
        let repo: &Path = profile.local_dir();
        let mut names: Vec<String> = self
            .query
            .local_branches(repo)?
            .into_iter()
            .filter(|name| all || name != MAINSTREAM)
            .collect();
        if all {
            names.extend(self.query.remote_branches(repo)?);
        }
        Ok(names)
    }

    fn local_commit_message(&self, message: Option<&str>) -> String {
        let timestamp = (self.clock)().format(TIMESTAMP_FORMAT);
        match message {
            Some(text) => format!("[local] {timestamp} ({text})"),
            None => format!("[local] {timestamp}"),
        }
    }
}

/// Commits whatever the remote tree holds onto the current feature and
/// pushes it, leaving the tree clean.
fn record_drift(remote: &mut RemoteSession, profile: &Profile) {
    remote.add_all();
    remote.commit(
        Message::literal(format!(
            "[remote] update from {}:{}",
            profile.remote_server(),
            profile.remote_dir().display()
        )),
        true,
    );
    remote.push();
}
