// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        setup / push / pull / go / ls / update
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |   config      profile     |
//!              | TOML + env   JSON records |
//!              '-------------+-------------'
//!                            v
//!                    lifecycle (SyncEngine)
//!                            |
//!          +-----------------+-----------------+
//!          v                 v                 v
//!      subsystem          workflow            git
//!     files / svn    local + remote batch   commands, gix
//!                            |
//!   +-----------------------------------------+
//!   |  core   process (tokio)                 |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod lifecycle;
pub mod logging;
pub mod profile;
pub mod subsystem;
pub mod workflow;
