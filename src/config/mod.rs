// ABOUTME: Configuration module for viewer settings
// ABOUTME: Re-exports the environment-driven viewer configuration and its errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the BIA viewer.
//!
//! Everything comes from environment variables; the CLI layers its flags on
//! top of the parsed values.

/// Environment variable parsing
pub mod environment;

pub use environment::{ConfigError, ViewerConfig};
