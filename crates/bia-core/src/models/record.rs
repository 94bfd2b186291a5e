// ABOUTME: Timestamped health records as served by the health data provider
// ABOUTME: Typed record values per metric, with nutrition energy left optional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::MetricType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed value carried by a health record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordValue {
    /// Body weight measurement
    Weight {
        /// Weight in kilograms
        kilograms: f64,
    },
    /// Body height measurement
    Height {
        /// Height in meters
        meters: f64,
    },
    /// Body fat measurement
    BodyFat {
        /// Body fat percentage (0-100)
        percentage: f64,
    },
    /// Basal metabolic rate measurement
    BasalMetabolicRate {
        /// Kilocalories per day
        kilocalories_per_day: f64,
    },
    /// Nutrition entry
    Nutrition {
        /// Energy in kilocalories, absent when the entry only logs nutrients
        #[serde(default, skip_serializing_if = "Option::is_none")]
        energy_kilocalories: Option<f64>,
    },
}

impl RecordValue {
    /// Metric type this value belongs to
    #[must_use]
    pub const fn metric(&self) -> MetricType {
        match self {
            Self::Weight { .. } => MetricType::Weight,
            Self::Height { .. } => MetricType::Height,
            Self::BodyFat { .. } => MetricType::BodyFat,
            Self::BasalMetabolicRate { .. } => MetricType::BasalMetabolicRate,
            Self::Nutrition { .. } => MetricType::Nutrition,
        }
    }
}

/// A timestamped measurement of one metric type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthRecord {
    /// When the measurement was taken
    pub time: DateTime<Utc>,
    /// Measured value
    #[serde(flatten)]
    pub value: RecordValue,
}

impl HealthRecord {
    /// Weight record
    #[must_use]
    pub const fn weight(time: DateTime<Utc>, kilograms: f64) -> Self {
        Self {
            time,
            value: RecordValue::Weight { kilograms },
        }
    }

    /// Height record
    #[must_use]
    pub const fn height(time: DateTime<Utc>, meters: f64) -> Self {
        Self {
            time,
            value: RecordValue::Height { meters },
        }
    }

    /// Body fat record
    #[must_use]
    pub const fn body_fat(time: DateTime<Utc>, percentage: f64) -> Self {
        Self {
            time,
            value: RecordValue::BodyFat { percentage },
        }
    }

    /// Basal metabolic rate record
    #[must_use]
    pub const fn basal_metabolic_rate(time: DateTime<Utc>, kilocalories_per_day: f64) -> Self {
        Self {
            time,
            value: RecordValue::BasalMetabolicRate {
                kilocalories_per_day,
            },
        }
    }

    /// Nutrition record
    #[must_use]
    pub const fn nutrition(time: DateTime<Utc>, energy_kilocalories: Option<f64>) -> Self {
        Self {
            time,
            value: RecordValue::Nutrition {
                energy_kilocalories,
            },
        }
    }

    /// Metric type of this record
    #[must_use]
    pub const fn metric(&self) -> MetricType {
        self.value.metric()
    }
}
