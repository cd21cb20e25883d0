// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subsystem policy: how the remote content relates to git.
//!
//! ```text
//! SubsystemKind (stored in the profile, fixed at setup)
//!     |  policy(&ToolsConfig)
//!     v
//! Subsystem (trait)
//!   exclude_patterns()      files: none        svn: .svn
//!   commit_message(wf)      "files sync"       "SVN r${revision}" (captured)
//!   absorb_upstream(wf)     no-op              svn update <wc>
//! ```


use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::types::ToolsConfig;
use crate::error::SubsystemError;
use crate::workflow::invocation::{Invocation, Message};
use crate::workflow::{VersionControlClient, Workflow};

/// Variable holding the captured external revision.
pub const REVISION_VAR: &str = "revision";

/// Subsystem tag as stored in profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubsystemKind {
    /// Git is authoritative; nothing external to absorb.
    #[default]
    Files,
    /// The content is a Subversion working copy.
    Svn,
}

impl SubsystemKind {
    pub const ALL: [Self; 2] = [Self::Files, Self::Svn];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Files => "files",
            Self::Svn => "svn",
        }
    }

    /// Returns the policy implementing this kind.
    #[must_use]
    pub fn policy(self, tools: &ToolsConfig) -> Box<dyn Subsystem> {
        match self {
            Self::Files => Box::new(FilesSubsystem),
            Self::Svn => Box::new(SvnSubsystem::new(&tools.svn)),
        }
    }
}

impl fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubsystemKind {
    type Err = SubsystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SubsystemError::UnknownKind(s.to_string()))
    }
}

/// Strategy for the remote content directory.
///
/// Every method only appends operations; nothing runs until the workflow does.
pub trait Subsystem: Send + Sync {
    fn kind(&self) -> SubsystemKind;

    /// Lines added to the remote tree's `info/exclude`.
    fn exclude_patterns(&self) -> &[&str];

    /// Appends whatever the message needs and returns it.
    ///
    /// The message is derived when the batch runs, never cached.
    fn commit_message(&self, workflow: &mut dyn Workflow) -> Message;

    /// Appends the steps that bring the content up to the latest external revision.
    fn absorb_upstream(&self, workflow: &mut dyn Workflow);
}

/// Plain files; git is the only history.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesSubsystem;

impl Subsystem for FilesSubsystem {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Files
    }

    fn exclude_patterns(&self) -> &[&str] {
        &[]
    }

    fn commit_message(&self, _workflow: &mut dyn Workflow) -> Message {
        Message::literal("files sync")
    }

    fn absorb_upstream(&self, _workflow: &mut dyn Workflow) {}
}

/// Subversion working copy on the remote host.
#[derive(Debug, Clone)]
pub struct SvnSubsystem {
    svn: String,
}

impl SvnSubsystem {
    pub fn new(svn: impl Into<String>) -> Self {
        Self { svn: svn.into() }
    }
}

impl Subsystem for SvnSubsystem {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Svn
    }

    fn exclude_patterns(&self) -> &[&str] {
        &[".svn"]
    }

    fn commit_message(&self, workflow: &mut dyn Workflow) -> Message {
        let working_copy = workflow.tree().content_dir().display().to_string();
        workflow.capture(
            REVISION_VAR,
            Invocation::new(&self.svn)
                .args(["info", "--show-item", "revision"])
                .arg(working_copy),
        );
        Message::literal("SVN r").var(REVISION_VAR)
    }

    fn absorb_upstream(&self, workflow: &mut dyn Workflow) {
        let working_copy = workflow.tree().content_dir().display().to_string();
        workflow.run_tool(
            Invocation::new(&self.svn)
                .args(["update", "--non-interactive"])
                .arg(working_copy),
        );
    }
}
