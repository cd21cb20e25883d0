// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .env_var() .capture_stdout()
//!   .run()
//!       --> tokio::process::Command
//!           stream stdout/stderr to the log
//!       --> ProcessOutput { command, exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;
