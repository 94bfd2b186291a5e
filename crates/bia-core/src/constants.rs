// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Platform thresholds, measurement units, provider names, and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain.

/// Platform support thresholds
pub mod platform {
    /// Minimum Android SDK level that can use Health Connect (8.1, `O_MR1`)
    pub const MIN_SUPPORTED_SDK: u32 = 27;
    /// SDK level assumed when nothing is configured
    pub const DEFAULT_SDK: u32 = 34;
}

/// Display suffixes for each measurement unit
pub mod units {
    /// Weight and fat mass
    pub const KILOGRAMS: &str = "kg";
    /// Height
    pub const METERS: &str = "m";
    /// Body fat
    pub const PERCENTAGE: &str = "%";
    /// Basal metabolic rate
    pub const KILOCALORIES_PER_DAY: &str = "kcal/day";
    /// Consumed energy
    pub const KILOCALORIES: &str = "KCal";
}

/// Provider identifiers
pub mod providers {
    /// In-memory provider for development and tests
    pub const SYNTHETIC: &str = "synthetic";
}

/// Service names used in structured logs
pub mod service_names {
    /// BIA Viewer
    pub const BIA_VIEWER: &str = "bia-viewer";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Platform SDK level
    pub const PLATFORM_SDK: &str = "BIA_PLATFORM_SDK";
    /// Whether the health data provider is installed (`true`/`false`)
    pub const PROVIDER_INSTALLED: &str = "BIA_PROVIDER_INSTALLED";
    /// Number of fraction digits shown in the report
    pub const DECIMAL_DIGITS: &str = "BIA_DECIMAL_DIGITS";
    /// JSON fixture file with health records for the synthetic provider
    pub const RECORDS_FILE: &str = "BIA_RECORDS_FILE";
}

/// Display defaults
pub mod display {
    /// Default fraction digits for every reading
    pub const DEFAULT_DECIMAL_DIGITS: usize = 1;
    /// Upper bound accepted from configuration
    pub const MAX_DECIMAL_DIGITS: usize = 6;
}
