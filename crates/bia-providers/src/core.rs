// ABOUTME: Core provider traits and interfaces for health data access
// ABOUTME: Defines record read requests, permission control, and platform information
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Data Provider Contract
//!
//! The viewer talks to the platform health-data broker through two traits:
//!
//! - [`HealthDataProvider`]: permission-check query and record-read query
//! - [`PermissionController`]: the out-of-process permission request flow,
//!   supplied by the host (a dialog on device, a flag in the CLI)
//!
//! Both are asynchronous because every call crosses a process boundary with
//! unbounded latency. No timeout is imposed here; whatever the provider
//! enforces is inherited.

use crate::errors::ProviderResult;
use crate::models::{HealthRecord, MetricType};
use crate::permissions::PermissionSet;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed time interval `[start, end]` for record queries
///
/// `start <= end` is expected but not enforced; an inverted range simply
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRangeFilter {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRangeFilter {
    /// Range between two instants, both inclusive
    #[must_use]
    pub const fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Range start
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Range end
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `time` falls inside the range
    #[must_use]
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Read query for one record type over a time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecordsRequest {
    /// Record type to read
    pub metric: MetricType,
    /// Time range filter
    pub time_range: TimeRangeFilter,
}

impl ReadRecordsRequest {
    /// Create a read request
    #[must_use]
    pub const fn new(metric: MetricType, time_range: TimeRangeFilter) -> Self {
        Self { metric, time_range }
    }
}

/// Records returned by a read query
///
/// Ordering is provider-defined and treated as chronologically ascending, so
/// the last record is the most recent one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadRecordsResponse {
    /// Matching records
    pub records: Vec<HealthRecord>,
}

impl ReadRecordsResponse {
    /// Wrap a record list
    #[must_use]
    pub const fn new(records: Vec<HealthRecord>) -> Self {
        Self { records }
    }

    /// Most recent record, if any
    #[must_use]
    pub fn last(&self) -> Option<&HealthRecord> {
        self.records.last()
    }
}

/// Facts about the device the viewer runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Platform SDK level
    pub sdk_version: u32,
    /// Whether the health data provider is present on the device
    pub provider_installed: bool,
}

/// Read access to the health data provider
#[async_trait]
pub trait HealthDataProvider: Send + Sync {
    /// Provider name used in logs and errors
    fn name(&self) -> &'static str;

    /// Permissions currently granted to the application
    ///
    /// Implementations may report tokens outside `requested`; callers decide
    /// how to compare.
    async fn granted_permissions(&self, requested: PermissionSet)
        -> ProviderResult<PermissionSet>;

    /// Read records of one type within a time range
    async fn read_records(&self, request: &ReadRecordsRequest)
        -> ProviderResult<ReadRecordsResponse>;
}

/// Host-supplied permission request flow
///
/// On device this opens the provider's permission dialog; the returned set is
/// whatever the user granted, possibly empty.
#[async_trait]
pub trait PermissionController: Send + Sync {
    /// Ask the user to grant `permissions`
    async fn request_permissions(&self, permissions: PermissionSet)
        -> ProviderResult<PermissionSet>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_time_range_is_inclusive() {
        let start = Utc::now();
        let end = start + Duration::hours(2);
        let range = TimeRangeFilter::between(start, end);
        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(end + Duration::seconds(1)));
        assert!(!range.contains(start - Duration::seconds(1)));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let end = Utc::now();
        let start = end + Duration::hours(1);
        let range = TimeRangeFilter::between(start, end);
        assert!(!range.contains(end));
        assert!(!range.contains(start));
    }
}
