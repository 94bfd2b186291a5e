// ABOUTME: Health data provider abstractions for body composition records
// ABOUTME: Provider traits, time range filtering, and the synthetic in-memory provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health data provider abstractions.
//!
//! The platform health-data broker is consumed, never reimplemented: this
//! crate only describes the calls the viewer makes against it and supplies an
//! in-memory stand-in for development and tests.

// Re-export bia-core modules so provider code can keep `use crate::errors::*` etc.
pub use bia_core::constants;
pub use bia_core::errors;
pub use bia_core::models;
pub use bia_core::permissions;

/// Core provider traits and request/response types
pub mod core;

/// Synthetic in-memory provider
#[cfg(feature = "provider-synthetic")]
pub mod synthetic_provider;

pub use crate::core::{
    HealthDataProvider, PermissionController, PlatformInfo, ReadRecordsRequest,
    ReadRecordsResponse, TimeRangeFilter,
};
pub use bia_core::errors::provider::{ProviderError, ProviderResult};
#[cfg(feature = "provider-synthetic")]
pub use synthetic_provider::{PermissionRequestBehavior, SyntheticHealthProvider};
