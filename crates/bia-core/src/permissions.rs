// ABOUTME: Health permission tokens modelled as a bit set
// ABOUTME: Defines the required read set and equality-based grant checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::MetricType;
use std::fmt;

bitflags::bitflags! {
    /// Set of health permission tokens
    ///
    /// Each flag corresponds to one platform permission string. The read flags
    /// for the five body composition record types form the required set; the
    /// write flags exist so that a provider can report more than was asked for.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct PermissionSet: u16 {
        /// Read weight records
        const READ_WEIGHT = 0b0000_0000_0001;
        /// Read height records
        const READ_HEIGHT = 0b0000_0000_0010;
        /// Read body fat records
        const READ_BODY_FAT = 0b0000_0000_0100;
        /// Read basal metabolic rate records
        const READ_BASAL_METABOLIC_RATE = 0b0000_0000_1000;
        /// Read nutrition records
        const READ_NUTRITION = 0b0000_0001_0000;
        /// Write weight records
        const WRITE_WEIGHT = 0b0000_0010_0000;
        /// Write height records
        const WRITE_HEIGHT = 0b0000_0100_0000;
        /// Write body fat records
        const WRITE_BODY_FAT = 0b0000_1000_0000;
        /// Write basal metabolic rate records
        const WRITE_BASAL_METABOLIC_RATE = 0b0001_0000_0000;
        /// Write nutrition records
        const WRITE_NUTRITION = 0b0010_0000_0000;
    }
}

impl PermissionSet {
    /// The five read permissions the viewer needs
    #[must_use]
    pub const fn required() -> Self {
        Self::READ_WEIGHT
            .union(Self::READ_HEIGHT)
            .union(Self::READ_BODY_FAT)
            .union(Self::READ_BASAL_METABOLIC_RATE)
            .union(Self::READ_NUTRITION)
    }

    /// Read permission for a single metric type
    #[must_use]
    pub const fn read(metric: MetricType) -> Self {
        match metric {
            MetricType::Weight => Self::READ_WEIGHT,
            MetricType::Height => Self::READ_HEIGHT,
            MetricType::BodyFat => Self::READ_BODY_FAT,
            MetricType::BasalMetabolicRate => Self::READ_BASAL_METABOLIC_RATE,
            MetricType::Nutrition => Self::READ_NUTRITION,
        }
    }

    /// Whether `granted` is exactly the required set
    ///
    /// A superset fails as well as a partial grant: revoking or adding any
    /// single token changes the answer.
    #[must_use]
    pub fn is_exactly_required(granted: Self) -> bool {
        granted == Self::required()
    }

    /// Platform permission strings for every token in the set
    #[must_use]
    pub fn tokens(&self) -> Vec<&'static str> {
        self.iter().filter_map(platform_token).collect()
    }

    /// Parse a platform permission string
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        PLATFORM_TOKENS
            .iter()
            .find(|(_, candidate)| *candidate == token)
            .map(|(flag, _)| *flag)
    }
}

const PLATFORM_TOKENS: [(PermissionSet, &str); 10] = [
    (PermissionSet::READ_WEIGHT, "android.permission.health.READ_WEIGHT"),
    (PermissionSet::READ_HEIGHT, "android.permission.health.READ_HEIGHT"),
    (PermissionSet::READ_BODY_FAT, "android.permission.health.READ_BODY_FAT"),
    (
        PermissionSet::READ_BASAL_METABOLIC_RATE,
        "android.permission.health.READ_BASAL_METABOLIC_RATE",
    ),
    (PermissionSet::READ_NUTRITION, "android.permission.health.READ_NUTRITION"),
    (PermissionSet::WRITE_WEIGHT, "android.permission.health.WRITE_WEIGHT"),
    (PermissionSet::WRITE_HEIGHT, "android.permission.health.WRITE_HEIGHT"),
    (PermissionSet::WRITE_BODY_FAT, "android.permission.health.WRITE_BODY_FAT"),
    (
        PermissionSet::WRITE_BASAL_METABOLIC_RATE,
        "android.permission.health.WRITE_BASAL_METABOLIC_RATE",
    ),
    (PermissionSet::WRITE_NUTRITION, "android.permission.health.WRITE_NUTRITION"),
];

fn platform_token(flag: PermissionSet) -> Option<&'static str> {
    PLATFORM_TOKENS
        .iter()
        .find(|(candidate, _)| *candidate == flag)
        .map(|(_, token)| *token)
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.tokens().join(", "))
    }
}
