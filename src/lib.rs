// ABOUTME: Main library entry point for the BIA body composition viewer
// ABOUTME: Gates health data reads on availability and permissions and formats the results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # BIA Viewer
//!
//! Reads body composition metrics (weight, height, body fat, basal metabolic
//! rate and consumed energy) from a platform health-data provider and turns
//! them into a single-screen report.
//!
//! ## Architecture
//!
//! - **`health_connect`**: availability gate, permission gate, read
//!   orchestrator and guarded execution with an observable outcome
//! - **`viewer`**: presentation controller for the startup, connect and
//!   refresh flows
//! - **`formatters`**: decimal formatting and report rendering
//! - **`config`** / **`logging`**: environment-driven setup
//!
//! Providers live in the `bia-providers` crate; shared models, permissions
//! and errors in `bia-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bia_viewer::health_connect::HealthConnectManager;
//! use bia_viewer::permissions::PermissionSet;
//! use bia_providers::{PlatformInfo, SyntheticHealthProvider};
//! use chrono::{Duration, Utc};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(SyntheticHealthProvider::new().granting(PermissionSet::required()));
//!     let platform = PlatformInfo { sdk_version: 34, provider_installed: true };
//!     let manager = HealthConnectManager::new(platform, provider.clone(), provider);
//!
//!     let end = Utc::now();
//!     let weight = manager.read_weight(end - Duration::days(1), end).await?;
//!     println!("weight: {weight}");
//!     Ok(())
//! }
//! ```

/// Shared record and metric models
pub use bia_core::models;
/// Health permission set
pub use bia_core::permissions;

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// Error types
pub mod errors;

/// Decimal formatting and report rendering
pub mod formatters;

/// Availability, permissions, and read orchestration
pub mod health_connect;

/// Structured logging setup
pub mod logging;

/// Viewer controller
pub mod viewer;
