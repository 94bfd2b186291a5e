// ABOUTME: Metric type enumeration for the five body composition record types
// ABOUTME: Maps each metric to its display unit and provider record name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::units;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of measurement read from the health data provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    /// Body weight in kilograms
    Weight,
    /// Body height in meters
    Height,
    /// Body fat as a percentage of weight
    BodyFat,
    /// Basal metabolic rate in kilocalories per day
    BasalMetabolicRate,
    /// Energy consumed in kilocalories
    Nutrition,
}

impl MetricType {
    /// Every metric in display order
    pub const ALL: [Self; 5] = [
        Self::Weight,
        Self::Height,
        Self::BodyFat,
        Self::BasalMetabolicRate,
        Self::Nutrition,
    ];

    /// Provider record type name
    #[must_use]
    pub const fn record_name(self) -> &'static str {
        match self {
            Self::Weight => "WeightRecord",
            Self::Height => "HeightRecord",
            Self::BodyFat => "BodyFatRecord",
            Self::BasalMetabolicRate => "BasalMetabolicRateRecord",
            Self::Nutrition => "NutritionRecord",
        }
    }

    /// Unit suffix used when displaying a reading of this metric
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Weight => units::KILOGRAMS,
            Self::Height => units::METERS,
            Self::BodyFat => units::PERCENTAGE,
            Self::BasalMetabolicRate => units::KILOCALORIES_PER_DAY,
            Self::Nutrition => units::KILOCALORIES,
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Weight => "weight",
            Self::Height => "height",
            Self::BodyFat => "body_fat",
            Self::BasalMetabolicRate => "basal_metabolic_rate",
            Self::Nutrition => "nutrition",
        };
        f.write_str(name)
    }
}
