// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules.
//!
//! ```text
//!   core
//!    |
//!    v
//! process
//!    |
//! Builder --> tokio::process --> Output
//! ```

pub mod process;
