// ABOUTME: Environment configuration for the viewer's platform facts and display settings
// ABOUTME: Parses SDK level, provider presence, fraction digits, and the record fixture path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::{display, env_config, platform};
use crate::errors::AppError;
use crate::formatters::DecimalFormat;
use bia_providers::PlatformInfo;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Configuration parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value of the wrong shape
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Parse {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// What was expected
        reason: &'static str,
    },

    /// A parsed value falls outside the accepted range
    #[error("Value out of range for {key}: {value} (maximum {max})")]
    ValueOutOfRange {
        /// Variable name
        key: &'static str,
        /// Parsed value
        value: usize,
        /// Largest accepted value
        max: usize,
    },
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Device facts used by the availability gate
    pub platform: PlatformInfo,
    /// Fraction digits shown for every reading
    pub decimal_digits: usize,
    /// JSON record fixture for the synthetic provider
    pub records_file: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            platform: PlatformInfo {
                sdk_version: platform::DEFAULT_SDK,
                provider_installed: true,
            },
            decimal_digits: display::DEFAULT_DECIMAL_DIGITS,
            records_file: None,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sdk_version = parse_var(&lookup, env_config::PLATFORM_SDK, "expected an SDK level")?
            .unwrap_or(defaults.platform.sdk_version);
        let provider_installed = lookup(env_config::PROVIDER_INSTALLED)
            .map(|value| parse_bool(env_config::PROVIDER_INSTALLED, &value))
            .transpose()?
            .unwrap_or(defaults.platform.provider_installed);
        let decimal_digits: usize =
            parse_var(&lookup, env_config::DECIMAL_DIGITS, "expected a digit count")?
                .unwrap_or(defaults.decimal_digits);
        if decimal_digits > display::MAX_DECIMAL_DIGITS {
            return Err(ConfigError::ValueOutOfRange {
                key: env_config::DECIMAL_DIGITS,
                value: decimal_digits,
                max: display::MAX_DECIMAL_DIGITS,
            });
        }
        let records_file = lookup(env_config::RECORDS_FILE)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let config = Self {
            platform: PlatformInfo {
                sdk_version,
                provider_installed,
            },
            decimal_digits,
            records_file,
        };
        debug!(?config, "Viewer configuration loaded");
        Ok(config)
    }

    /// Number formatter for the configured fraction digits
    #[must_use]
    pub fn decimal_format(&self) -> DecimalFormat {
        DecimalFormat::new(self.decimal_digits)
    }
}

fn parse_var<F, T>(
    lookup: &F,
    key: &'static str,
    reason: &'static str,
) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Parse {
                key,
                value: value.clone(),
                reason,
            })
        })
        .transpose()
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Parse {
            key,
            value: value.to_owned(),
            reason: "expected true or false",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ViewerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.decimal_format().fraction_digits(), 1);
    }

    #[test]
    fn test_all_variables_parsed() {
        let config = ViewerConfig::from_lookup(lookup_from(&[
            ("BIA_PLATFORM_SDK", "26"),
            ("BIA_PROVIDER_INSTALLED", "no"),
            ("BIA_DECIMAL_DIGITS", "2"),
            ("BIA_RECORDS_FILE", "/tmp/records.json"),
        ]))
        .unwrap();

        assert_eq!(config.platform.sdk_version, 26);
        assert!(!config.platform.provider_installed);
        assert_eq!(config.decimal_digits, 2);
        assert_eq!(config.records_file, Some(PathBuf::from("/tmp/records.json")));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ViewerConfig::from_lookup(lookup_from(&[("BIA_PLATFORM_SDK", "oreo")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { key: "BIA_PLATFORM_SDK", .. }));

        let err = ViewerConfig::from_lookup(lookup_from(&[("BIA_PROVIDER_INSTALLED", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let err = ViewerConfig::from_lookup(lookup_from(&[("BIA_DECIMAL_DIGITS", "9")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ValueOutOfRange {
                key: "BIA_DECIMAL_DIGITS",
                value: 9,
                max: 6
            }
        );
        assert_eq!(AppError::from(err).code, ErrorCode::ConfigInvalid);
    }
}
