// ABOUTME: Availability gate deciding whether the health data provider can be used
// ABOUTME: Derives Installed/NotInstalled/NotSupported from platform version and provider presence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::platform::MIN_SUPPORTED_SDK;
use bia_providers::PlatformInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the health data provider can be used on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Provider present on a supported platform
    Installed,
    /// Platform supports the provider but it is not installed
    NotInstalled,
    /// Platform version is below the minimum supported
    NotSupported,
}

impl Availability {
    /// Whether reads can be attempted
    #[must_use]
    pub const fn is_installed(self) -> bool {
        matches!(self, Self::Installed)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Installed => "installed",
            Self::NotInstalled => "not installed",
            Self::NotSupported => "not supported",
        };
        f.write_str(label)
    }
}

/// Whether the platform version can run the provider at all
#[must_use]
pub const fn is_supported(sdk_version: u32) -> bool {
    sdk_version >= MIN_SUPPORTED_SDK
}

/// Derive availability from the environment
///
/// A version below [`MIN_SUPPORTED_SDK`] is `NotSupported` even if a provider
/// package happens to be present.
#[must_use]
pub const fn compute_availability(platform: PlatformInfo) -> Availability {
    if !is_supported(platform.sdk_version) {
        Availability::NotSupported
    } else if platform.provider_installed {
        Availability::Installed
    } else {
        Availability::NotInstalled
    }
}
