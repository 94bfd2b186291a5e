// ABOUTME: Body composition snapshot assembled from one refresh of the five metrics
// ABOUTME: Derives body mass index and fat mass from the raw readings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Body mass index, `weight / height²`
///
/// Returns 0 when `height` is 0 so that a missing height reading never
/// produces an infinite or NaN index.
#[must_use]
#[allow(clippy::float_cmp)] // exact zero is the "no height recorded" sentinel
pub fn body_mass_index(weight_kg: f64, height_m: f64) -> f64 {
    if height_m == 0.0 {
        return 0.0;
    }
    weight_kg / (height_m * height_m)
}

/// Fat mass in kilograms, `weight × body_fat / 100`
#[must_use]
pub fn fat_mass(weight_kg: f64, body_fat_percentage: f64) -> f64 {
    weight_kg * body_fat_percentage / 100.0
}

/// Latest readings for one time range
///
/// Each field is 0.0 when the provider holds no record for it in range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BodyComposition {
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in meters
    pub height_m: f64,
    /// Body fat percentage
    pub body_fat_percentage: f64,
    /// Basal metabolic rate in kilocalories per day
    pub basal_metabolic_rate_kcal: f64,
    /// Energy consumed in kilocalories
    pub energy_kcal: f64,
}

impl BodyComposition {
    /// Body mass index for this snapshot
    #[must_use]
    pub fn bmi(&self) -> f64 {
        body_mass_index(self.weight_kg, self.height_m)
    }

    /// Fat mass in kilograms for this snapshot
    #[must_use]
    pub fn fat_mass(&self) -> f64 {
        fat_mass(self.weight_kg, self.body_fat_percentage)
    }
}
