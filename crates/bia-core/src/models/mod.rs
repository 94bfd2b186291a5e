// ABOUTME: Core data models for body composition readings
// ABOUTME: Re-exports metric types, health records, and derived body composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared by the provider and viewer crates.

mod body_composition;
mod metric;
mod record;

pub use body_composition::{body_mass_index, fat_mass, BodyComposition};
pub use metric::MetricType;
pub use record::{HealthRecord, RecordValue};
