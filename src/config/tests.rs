// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;
use std::path::PathBuf;

use super::Config;
use super::loader::ConfigLoader;
use super::paths::{PathsConfig, expand_home};
use crate::logging::LogLevel;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert!(config.global.log_file.is_none());
    assert_eq!(config.remote.root_dir, ".gru_remote");
    assert_eq!(config.remote.path_prefix, "/usr/local/bin");
    assert_eq!(config.tools.git, "git");
    assert_eq!(config.tools.svn, "svn");
    assert_eq!(config.sync.default_feature, "noname");
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
[global]
output_log_level = 4

[paths]
profiles = "/srv/gru"

[remote]
root_dir = ".sync"

[tools]
ssh = "/usr/bin/ssh"

[sync]
default_feature = "scratch"
"#,
    )
    .expect("valid config");

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.paths.profiles, Some(PathBuf::from("/srv/gru")));
    assert_eq!(config.remote.root_dir, ".sync");
    assert_eq!(config.remote.path_prefix, "/usr/local/bin");
    assert_eq!(config.tools.ssh, "/usr/bin/ssh");
    assert_eq!(config.tools.scp, "scp");
    assert_eq!(config.sync.default_feature, "scratch");
}

#[test]
fn test_config_rejects_unknown_keys() {
    assert!(Config::parse("[remote]\nhost = \"box\"\n").is_err());
    assert!(Config::parse("[unknown]\nkey = 1\n").is_err());
}

#[test]
fn test_config_rejects_invalid_values() {
    let err = Config::parse("[sync]\ndefault_feature = \"mainstream\"\n")
        .expect_err("mainstream is reserved");
    assert!(err.to_string().contains("default_feature"));

    let err = Config::parse("[remote]\nroot_dir = \"/abs\"\n").expect_err("absolute root");
    assert!(err.to_string().contains("root_dir"));

    let err = Config::parse("[tools]\ngit = \"\"\n").expect_err("empty tool");
    assert!(err.to_string().contains("'git'"));

    assert!(Config::parse("[global]\noutput_log_level = 9\n").is_err());
}

#[test]
fn test_config_loader_overrides() {
    let config = ConfigLoader::new()
        .add_toml_str("[sync]\ndefault_feature = \"first\"\n")
        .set("sync.default_feature", "second")
        .expect("valid override")
        .build()
        .expect("valid config");
    assert_eq!(config.sync.default_feature, "second");
}

#[test]
fn test_config_loader_tracks_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("gru.toml");
    let mut file = std::fs::File::create(&path).expect("create file");
    writeln!(file, "[remote]\npath_prefix = \"/opt/bin\"").expect("write file");

    let loader = ConfigLoader::new()
        .add_toml_file_optional(dir.path().join("missing.toml"))
        .add_toml_file(&path);
    let formatted = loader.format_loaded_files();
    assert_eq!(formatted, [format!("1. [file] {}", path.display())]);

    let config = loader.build().expect("valid config");
    assert_eq!(config.remote.path_prefix, "/opt/bin");
}

#[test]
fn test_config_missing_required_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let loader = Config::builder().add_toml_file(dir.path().join("absent.toml"));
    assert!(loader.build().is_err());
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::parse("[paths]\nprofiles = \"/srv/gru\"\n").expect("valid config");
    let options = config.format_options();

    let keys: Vec<&str> = options
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    insta::assert_snapshot!(keys.join(" "), @"global.file_log_level global.log_file global.output_log_level paths.profiles remote.path_prefix remote.root_dir sync.default_feature tools.git tools.scp tools.ssh tools.svn");
    assert!(options.contains(&format!("{:<23} = {}", "paths.profiles", "/srv/gru")));
    assert!(options.contains(&format!("{:<23} = {}", "remote.root_dir", ".gru_remote")));
    assert_eq!(options, config.format_options());
}

#[test]
fn test_paths_resolve_expands_home() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let mut paths = PathsConfig {
        profiles: Some(PathBuf::from("~/profiles")),
    };
    paths.resolve().expect("home is known");
    assert_eq!(paths.profiles, Some(home.join("profiles")));

    let mut defaults = PathsConfig::default();
    defaults.resolve().expect("home is known");
    assert_eq!(defaults.profiles, Some(home.join(".gru_local")));

    assert_eq!(
        expand_home(&PathBuf::from("/abs/dir")).expect("no expansion"),
        PathBuf::from("/abs/dir")
    );
}
