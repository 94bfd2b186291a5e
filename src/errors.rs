// ABOUTME: Unified error handling for the viewer application
// ABOUTME: Re-exports the shared error codes, application error, and provider fault types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Error types.
//!
//! Defined in `bia-core` so that providers and the viewer share them.

pub use bia_core::errors::*;
