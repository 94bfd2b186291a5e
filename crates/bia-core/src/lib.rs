// ABOUTME: Core types and constants for the BIA Viewer body composition reader
// ABOUTME: Foundation crate with error handling, permission set, metric models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # BIA Core
//!
//! Foundation crate providing shared types and constants for BIA Viewer.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the provider fault taxonomy
//! - **constants**: Platform thresholds, units, and environment keys
//! - **permissions**: Health permission tokens as a bit set
//! - **models**: Metric types, health records, and derived body composition

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Health permission tokens required to read body composition records
pub mod permissions;

/// Core data models (metric types, records, body composition)
pub mod models;
