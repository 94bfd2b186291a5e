// ABOUTME: Output formatting for body composition reports
// ABOUTME: Decimal formatting with grouping, unit suffixes, and text or JSON rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Output formatting layer.
//!
//! Turns a [`BodyComposition`] into the strings shown on screen, deriving
//! BMI and fat mass on the way, and renders the result as aligned text or
//! JSON.

use crate::constants::display;
use crate::errors::AppResult;
use crate::models::{BodyComposition, MetricType};
use serde::Serialize;
use std::fmt;

/// Output serialization format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable labelled lines (default)
    #[default]
    Text,
    /// JSON object, for scripting
    Json,
}

impl OutputFormat {
    /// Parse format from string parameter (case-insensitive)
    /// Returns `Text` for unrecognized values
    #[must_use]
    pub fn from_str_param(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Get the format name as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed fraction digits with thousands grouping, like the `#,##0.0` pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormat {
    fraction_digits: usize,
}

impl Default for DecimalFormat {
    fn default() -> Self {
        Self::new(display::DEFAULT_DECIMAL_DIGITS)
    }
}

impl DecimalFormat {
    /// Formatter with `fraction_digits` digits after the point
    #[must_use]
    pub fn new(fraction_digits: usize) -> Self {
        Self {
            fraction_digits: fraction_digits.min(display::MAX_DECIMAL_DIGITS),
        }
    }

    /// Digits after the decimal point
    #[must_use]
    pub const fn fraction_digits(&self) -> usize {
        self.fraction_digits
    }

    /// Format `value`
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let fixed = format!("{value:.*}", self.fraction_digits);
        let (sign, unsigned) = fixed
            .strip_prefix('-')
            .map_or(("", fixed.as_str()), |rest| ("-", rest));
        let (integer, fraction) = unsigned
            .split_once('.')
            .map_or((unsigned, None), |(i, f)| (i, Some(f)));

        let mut grouped = String::with_capacity(fixed.len() + integer.len() / 3);
        for (index, digit) in integer.chars().enumerate() {
            if index > 0 && (integer.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        // "-0.0" reads oddly on a scale display
        let is_zero = !unsigned.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if is_zero { "" } else { sign };

        match fraction {
            Some(fraction) => format!("{sign}{grouped}.{fraction}"),
            None => format!("{sign}{grouped}"),
        }
    }

    /// Format `value` followed by `unit`
    #[must_use]
    pub fn format_with_unit(&self, value: f64, unit: &str) -> String {
        format!("{}{unit}", self.format(value))
    }
}

/// Display strings for one refresh, plus the raw readings they came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyCompositionReport {
    /// Weight with unit
    pub weight: String,
    /// Body mass index (no unit)
    pub bmi: String,
    /// Body fat with unit
    pub body_fat: String,
    /// Fat mass with unit
    pub fat_mass: String,
    /// Basal metabolic rate with unit
    pub basal_metabolic_rate: String,
    /// Consumed energy with unit
    pub calories: String,
    /// Raw readings
    pub readings: BodyComposition,
}

impl BodyCompositionReport {
    /// Format `readings`, deriving BMI and fat mass
    #[must_use]
    pub fn new(readings: BodyComposition, format: DecimalFormat) -> Self {
        Self {
            weight: format.format_with_unit(readings.weight_kg, MetricType::Weight.unit()),
            bmi: format.format(readings.bmi()),
            body_fat: format
                .format_with_unit(readings.body_fat_percentage, MetricType::BodyFat.unit()),
            // fat mass is a weight
            fat_mass: format.format_with_unit(readings.fat_mass(), MetricType::Weight.unit()),
            basal_metabolic_rate: format.format_with_unit(
                readings.basal_metabolic_rate_kcal,
                MetricType::BasalMetabolicRate.unit(),
            ),
            calories: format.format_with_unit(readings.energy_kcal, MetricType::Nutrition.unit()),
            readings,
        }
    }

    /// Render the report
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.to_string()),
        }
    }
}

impl fmt::Display for BodyCompositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weight      {}", self.weight)?;
        writeln!(f, "BMI         {}", self.bmi)?;
        writeln!(f, "Body fat    {}", self.body_fat)?;
        writeln!(f, "Fat mass    {}", self.fat_mass)?;
        writeln!(f, "BMR         {}", self.basal_metabolic_rate)?;
        write!(f, "Calories    {}", self.calories)
    }
}
