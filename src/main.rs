// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Setup | Push | Pull | Go | Ls | Update | Profiles | Options | Inis
//! ```

use std::process::ExitCode;

use gru_rs::cli::global::GlobalOptions;
use gru_rs::cli::{self, Command};
use gru_rs::cmd::feature::{run_go_command, run_ls_command};
use gru_rs::cmd::options::{run_inis_command, run_options_command, run_profiles_command};
use gru_rs::cmd::setup::run_setup_command;
use gru_rs::cmd::sync::{run_pull_command, run_push_command, run_update_command};
use gru_rs::config::Config;
use gru_rs::logging::LogConfig;
use gru_rs::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let command = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        Some(Command::Inis) => {
            let loader = Config::standard_loader(&cli.global.inis);
            run_inis_command(&loader.format_loaded_files());
            return ExitCode::SUCCESS;
        }
        Some(command) => command,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        }
    };

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(command, &cli.global.profile, &config).await
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

async fn dispatch_command(command: &Command, profile: &str, config: &Config) -> ExitCode {
    let result = match command {
        // Answered before the config is loaded.
        Command::Version | Command::Inis => Ok(()),
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Profiles => run_profiles_command(config),
        Command::Setup(args) => run_setup_command(args, profile, config).await,
        Command::Push(args) => run_push_command(args, profile, config).await,
        Command::Pull => run_pull_command(profile, config).await,
        Command::Go(args) => run_go_command(args, profile, config).await,
        Command::Ls(args) => run_ls_command(args, profile, config),
        Command::Update => run_update_command(profile, config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> gru_rs::error::Result<Config> {
    let loader = Config::standard_loader(&global.inis);
    global.apply_overrides(loader)?.build()
}
