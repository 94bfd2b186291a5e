// ABOUTME: Integration tests for environment-driven configuration
// ABOUTME: Exercises viewer and logging configuration against real process variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used)]

use bia_viewer::config::{ConfigError, ViewerConfig};
use bia_viewer::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const VARS: [&str; 7] = [
    "BIA_PLATFORM_SDK",
    "BIA_PROVIDER_INSTALLED",
    "BIA_DECIMAL_DIGITS",
    "BIA_RECORDS_FILE",
    "RUST_LOG",
    "LOG_FORMAT",
    "LOG_INCLUDE_LOCATION",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_viewer_config_from_env() {
    clear_env();
    env::set_var("BIA_PLATFORM_SDK", "33");
    env::set_var("BIA_PROVIDER_INSTALLED", "false");
    env::set_var("BIA_DECIMAL_DIGITS", "0");
    env::set_var("BIA_RECORDS_FILE", "fixtures/today.json");

    let config = ViewerConfig::from_env().unwrap();

    assert_eq!(config.platform.sdk_version, 33);
    assert!(!config.platform.provider_installed);
    assert_eq!(config.decimal_format().format(1650.4), "1,650");
    assert_eq!(config.records_file, Some(PathBuf::from("fixtures/today.json")));
    clear_env();
}

#[test]
#[serial]
fn test_viewer_config_rejects_garbage() {
    clear_env();
    env::set_var("BIA_DECIMAL_DIGITS", "two");

    let err = ViewerConfig::from_env().unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Parse {
            key: "BIA_DECIMAL_DIGITS",
            ..
        }
    ));
    clear_env();
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    assert_eq!(LoggingConfig::from_env(), LoggingConfig::default());

    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("LOG_INCLUDE_LOCATION", "1");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    clear_env();
}
