// ABOUTME: Health data access layer: availability gate, permission gate, and read orchestration
// ABOUTME: Exposes the manager and its observable availability and execution state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Availability gate derived from platform version and provider presence
pub mod availability;
/// Permission-gated read orchestrator
pub mod manager;
/// Observable state containers
pub mod state;

pub use availability::{compute_availability, is_supported, Availability};
pub use manager::HealthConnectManager;
pub use state::{ExecutionState, StateCell};
