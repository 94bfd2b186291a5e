// ABOUTME: Application constants organized by domain
// ABOUTME: Re-exports the shared platform, unit, provider, and environment constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain, defined in `bia-core`.

pub use bia_core::constants::*;
