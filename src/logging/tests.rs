// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_filter_strings() {
    insta::assert_snapshot!(LogLevel::SILENT.to_filter_string(), @"off");
    insta::assert_snapshot!(LogLevel::WARN.to_filter_string(), @"warn");
    insta::assert_snapshot!(LogLevel::DEBUG.to_filter_string(), @"warn,gru_rs=debug,gru=debug");
    insta::assert_snapshot!(LogLevel::DUMP.to_filter_string(), @"trace");
}

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(6).is_ok());
    let err = LogLevel::new(7).expect_err("7 is out of range");
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 7"
    );
    assert_eq!(LogLevel::from_u8(4), Some(LogLevel::DEBUG));
    assert!(LogLevel::from_u8(9).is_none());
}

#[test]
fn test_log_level_ordering() {
    assert!(LogLevel::SILENT < LogLevel::INFO);
    assert!(LogLevel::TRACE < LogLevel::DUMP);
    assert_eq!(LogLevel::default(), LogLevel::INFO);
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::builder().build();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());

    let config = LogConfig::builder()
        .with_console_level(LogLevel::DEBUG)
        .with_log_file("gru.log".to_string())
        .build();
    assert_eq!(config.console_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some("gru.log"));
}
