// ABOUTME: Synthetic health data provider for development and testing
// ABOUTME: Serves in-memory records with configurable grants and injectable faults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to ProviderError::ConfigurationError
// for proper error propagation through the application

//! # Synthetic Health Provider
//!
//! An in-memory stand-in for the platform health-data broker. Unlike the real
//! broker, the synthetic provider:
//!
//! - Needs no device and no permission dialog
//! - Accepts records injected at runtime or loaded from a JSON fixture
//! - Lets tests choose the granted permission set exactly (including supersets)
//! - Can fail the next calls with any recoverable fault category
//!
//! ## Thread Safety
//!
//! All data access is protected by `RwLock` for thread-safe concurrent
//! operations, so the five reads of a refresh can run in parallel.

use crate::constants::providers;
use crate::core::{
    HealthDataProvider, PermissionController, ReadRecordsRequest, ReadRecordsResponse,
};
use crate::errors::{FaultCategory, ProviderError, ProviderResult};
use crate::models::HealthRecord;
use crate::permissions::PermissionSet;
use async_trait::async_trait;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// How the synthetic permission dialog answers a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionRequestBehavior {
    /// The user accepts everything that was requested
    GrantRequested,
    /// The user dismisses the dialog
    GrantNothing,
    /// The user ends up with exactly this set
    Grant(PermissionSet),
}

/// Synthetic health data provider for development and testing
///
/// # Examples
///
/// ```rust
/// use bia_providers::models::HealthRecord;
/// use bia_providers::permissions::PermissionSet;
/// use bia_providers::SyntheticHealthProvider;
/// use chrono::Utc;
///
/// let provider = SyntheticHealthProvider::with_records(vec![
///     HealthRecord::weight(Utc::now(), 72.4),
/// ])
/// .granting(PermissionSet::required());
/// assert_eq!(provider.record_count().ok(), Some(1));
/// ```
pub struct SyntheticHealthProvider {
    records: Arc<RwLock<Vec<HealthRecord>>>,
    granted: Arc<RwLock<PermissionSet>>,
    read_fault: Arc<RwLock<Option<FaultCategory>>>,
    permission_fault: Arc<RwLock<Option<FaultCategory>>>,
    request_behavior: Arc<RwLock<PermissionRequestBehavior>>,
    read_calls: AtomicUsize,
}

impl SyntheticHealthProvider {
    /// Create a provider holding `records` with no permissions granted
    #[must_use]
    pub fn with_records(records: Vec<HealthRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            granted: Arc::new(RwLock::new(PermissionSet::empty())),
            read_fault: Arc::new(RwLock::new(None)),
            permission_fault: Arc::new(RwLock::new(None)),
            request_behavior: Arc::new(RwLock::new(PermissionRequestBehavior::GrantRequested)),
            read_calls: AtomicUsize::new(0),
        }
    }

    /// Create an empty provider
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Load records from a JSON array fixture
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Io` if the file cannot be read and
    /// `ProviderError::ConfigurationError` if it is not a valid record list.
    pub fn from_json_file(path: impl AsRef<Path>) -> ProviderResult<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| ProviderError::io(providers::SYNTHETIC, e))?;
        let records: Vec<HealthRecord> =
            serde_json::from_str(&contents).map_err(|e| ProviderError::ConfigurationError {
                provider: providers::SYNTHETIC.to_owned(),
                details: format!("invalid record fixture {}: {e}", path.display()),
            })?;
        debug!(
            path = %path.display(),
            records = records.len(),
            "Loaded synthetic health records"
        );
        Ok(Self::with_records(records))
    }

    /// Builder: start with `permissions` granted
    #[must_use]
    pub fn granting(self, permissions: PermissionSet) -> Self {
        if let Ok(mut granted) = self.granted.write() {
            *granted = permissions;
        }
        self
    }

    /// Builder: answer permission requests with `behavior`
    #[must_use]
    pub fn answering_requests(self, behavior: PermissionRequestBehavior) -> Self {
        if let Ok(mut current) = self.request_behavior.write() {
            *current = behavior;
        }
        self
    }

    /// Add a record dynamically
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn add_record(&self, record: HealthRecord) -> ProviderResult<()> {
        self.records.write().map_err(|_| poisoned("records"))?.push(record);
        Ok(())
    }

    /// Number of records currently held
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn record_count(&self) -> ProviderResult<usize> {
        Ok(self.records.read().map_err(|_| poisoned("records"))?.len())
    }

    /// Replace the granted permission set
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn set_granted(&self, permissions: PermissionSet) -> ProviderResult<()> {
        *self.granted.write().map_err(|_| poisoned("granted"))? = permissions;
        Ok(())
    }

    /// Fail every subsequent record read with `category` (`None` clears it)
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn fail_reads_with(&self, category: Option<FaultCategory>) -> ProviderResult<()> {
        *self.read_fault.write().map_err(|_| poisoned("read_fault"))? = category;
        Ok(())
    }

    /// Fail every subsequent permission check with `category` (`None` clears it)
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn fail_permission_checks_with(
        &self,
        category: Option<FaultCategory>,
    ) -> ProviderResult<()> {
        *self
            .permission_fault
            .write()
            .map_err(|_| poisoned("permission_fault"))? = category;
        Ok(())
    }

    /// How many `read_records` calls reached this provider
    #[must_use]
    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    fn injected(slot: &RwLock<Option<FaultCategory>>, operation: &str) -> ProviderResult<()> {
        let category = *slot.read().map_err(|_| poisoned(operation))?;
        match category {
            Some(category) => Err(fault(category, operation)),
            None => Ok(()),
        }
    }
}

impl Default for SyntheticHealthProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(lock: &str) -> ProviderError {
    ProviderError::ConfigurationError {
        provider: providers::SYNTHETIC.to_owned(),
        details: format!("RwLock poisoned: {lock} lock"),
    }
}

fn fault(category: FaultCategory, operation: &str) -> ProviderError {
    let details = format!("injected fault during {operation}");
    match category {
        FaultCategory::RemoteCall => ProviderError::remote_call(providers::SYNTHETIC, details),
        FaultCategory::Security => ProviderError::security(providers::SYNTHETIC, details),
        FaultCategory::Io => ProviderError::io(
            providers::SYNTHETIC,
            io::Error::new(io::ErrorKind::ConnectionReset, details),
        ),
        FaultCategory::IllegalState => ProviderError::illegal_state(providers::SYNTHETIC, details),
        FaultCategory::MissingField => ProviderError::MissingField {
            record: "SyntheticRecord",
            field: "value",
        },
        _ => ProviderError::ConfigurationError {
            provider: providers::SYNTHETIC.to_owned(),
            details,
        },
    }
}

#[async_trait]
impl HealthDataProvider for SyntheticHealthProvider {
    fn name(&self) -> &'static str {
        providers::SYNTHETIC
    }

    async fn granted_permissions(
        &self,
        requested: PermissionSet,
    ) -> ProviderResult<PermissionSet> {
        Self::injected(&self.permission_fault, "permission check")?;
        let granted = *self.granted.read().map_err(|_| poisoned("granted"))?;
        debug!(%requested, %granted, "Synthetic permission check");
        Ok(granted)
    }

    async fn read_records(
        &self,
        request: &ReadRecordsRequest,
    ) -> ProviderResult<ReadRecordsResponse> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        Self::injected(&self.read_fault, "record read")?;

        let mut matching: Vec<HealthRecord> = self
            .records
            .read()
            .map_err(|_| poisoned("records"))?
            .iter()
            .filter(|record| {
                record.metric() == request.metric && request.time_range.contains(record.time)
            })
            .cloned()
            .collect();
        // Stable sort keeps insertion order for identical timestamps
        matching.sort_by_key(|record| record.time);

        debug!(
            metric = %request.metric,
            records = matching.len(),
            "Synthetic record read"
        );
        Ok(ReadRecordsResponse::new(matching))
    }
}

#[async_trait]
impl PermissionController for SyntheticHealthProvider {
    async fn request_permissions(
        &self,
        permissions: PermissionSet,
    ) -> ProviderResult<PermissionSet> {
        let behavior = *self
            .request_behavior
            .read()
            .map_err(|_| poisoned("request_behavior"))?;
        let outcome = match behavior {
            PermissionRequestBehavior::GrantRequested => {
                let mut granted = self.granted.write().map_err(|_| poisoned("granted"))?;
                *granted |= permissions;
                permissions
            }
            PermissionRequestBehavior::GrantNothing => PermissionSet::empty(),
            PermissionRequestBehavior::Grant(set) => {
                *self.granted.write().map_err(|_| poisoned("granted"))? = set;
                set
            }
        };
        debug!(requested = %permissions, granted = %outcome, "Synthetic permission request");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeRangeFilter;
    use crate::models::MetricType;
    use chrono::{Duration, Utc};
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_are_filtered_and_sorted() {
        let now = Utc::now();
        let provider = SyntheticHealthProvider::with_records(vec![
            HealthRecord::weight(now - Duration::hours(1), 71.0),
            HealthRecord::height(now - Duration::hours(1), 1.80),
            HealthRecord::weight(now - Duration::hours(3), 72.0),
            HealthRecord::weight(now - Duration::days(2), 90.0),
        ]);

        let request = ReadRecordsRequest::new(
            MetricType::Weight,
            TimeRangeFilter::between(now - Duration::hours(12), now),
        );
        let response = provider.read_records(&request).await.unwrap();

        assert_eq!(response.records.len(), 2);
        assert_eq!(response.last().map(|r| r.time), Some(now - Duration::hours(1)));
        assert_eq!(provider.read_calls(), 1);
    }

    #[tokio::test]
    async fn test_injected_read_fault() {
        let provider = SyntheticHealthProvider::new();
        provider
            .fail_reads_with(Some(FaultCategory::RemoteCall))
            .unwrap();
        let now = Utc::now();
        let request = ReadRecordsRequest::new(
            MetricType::Height,
            TimeRangeFilter::between(now, now),
        );
        let err = provider.read_records(&request).await.unwrap_err();
        assert_eq!(err.category(), FaultCategory::RemoteCall);
    }

    #[tokio::test]
    async fn test_permission_request_behaviors() {
        let provider = SyntheticHealthProvider::new();
        let granted = provider
            .request_permissions(PermissionSet::required())
            .await
            .unwrap();
        assert_eq!(granted, PermissionSet::required());
        assert_eq!(
            provider
                .granted_permissions(PermissionSet::required())
                .await
                .unwrap(),
            PermissionSet::required()
        );

        let stingy = SyntheticHealthProvider::new()
            .answering_requests(PermissionRequestBehavior::GrantNothing);
        let granted = stingy
            .request_permissions(PermissionSet::required())
            .await
            .unwrap();
        assert!(granted.is_empty());
    }

    #[test]
    fn test_fixture_loading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"time":"2025-01-10T08:00:00Z","type":"weight","kilograms":68.2}},
                {{"time":"2025-01-10T08:00:00Z","type":"nutrition","energy_kilocalories":540.0}}]"#
        )
        .unwrap();

        let provider = SyntheticHealthProvider::from_json_file(file.path()).unwrap();
        assert_eq!(provider.record_count().unwrap(), 2);

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "not json").unwrap();
        let err = SyntheticHealthProvider::from_json_file(broken.path())
            .err()
            .unwrap();
        assert_eq!(err.category(), FaultCategory::Configuration);
    }
}
