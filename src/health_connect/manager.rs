// ABOUTME: Health data manager gating reads on availability and permissions
// ABOUTME: Issues per-metric read queries and runs batches under a guarded permission check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Connect Manager
//!
//! Thin orchestration over a [`HealthDataProvider`]:
//!
//! 1. **Availability gate**: computed once from [`PlatformInfo`] at construction
//! 2. **Permission gate**: `has_all_permissions` compares the granted set with
//!    the required set by equality, re-queried on every call
//! 3. **Read orchestrator**: one read per metric, latest record wins, empty
//!    range reads as 0.0
//! 4. **Guarded execution**: re-check permissions, run a batch, record the
//!    outcome in an observable [`ExecutionState`]

use super::availability::{compute_availability, Availability};
use super::state::{ExecutionState, StateCell};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{BodyComposition, HealthRecord, MetricType, RecordValue};
use crate::permissions::PermissionSet;
use bia_providers::{
    HealthDataProvider, PermissionController, PlatformInfo, ReadRecordsRequest, TimeRangeFilter,
};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Gatekeeper and read orchestrator for body composition metrics
pub struct HealthConnectManager {
    provider: Arc<dyn HealthDataProvider>,
    permission_controller: Arc<dyn PermissionController>,
    permissions: PermissionSet,
    availability: StateCell<Availability>,
    permissions_granted: StateCell<bool>,
    execution_state: StateCell<ExecutionState>,
}

impl HealthConnectManager {
    /// Create a manager and evaluate availability for `platform`
    #[must_use]
    pub fn new(
        platform: PlatformInfo,
        provider: Arc<dyn HealthDataProvider>,
        permission_controller: Arc<dyn PermissionController>,
    ) -> Self {
        let availability = compute_availability(platform);
        info!(
            provider = provider.name(),
            sdk_version = platform.sdk_version,
            provider_installed = platform.provider_installed,
            %availability,
            "Health data availability evaluated"
        );

        Self {
            provider,
            permission_controller,
            permissions: PermissionSet::required(),
            availability: StateCell::new(availability),
            permissions_granted: StateCell::new(false),
            execution_state: StateCell::new(ExecutionState::Uninitialized),
        }
    }

    /// Current availability
    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability.get()
    }

    /// Observe availability changes
    #[must_use]
    pub fn subscribe_availability(&self) -> watch::Receiver<Availability> {
        self.availability.subscribe()
    }

    /// Re-evaluate availability, e.g. after the user installed the provider
    pub fn requery_availability(&self, platform: PlatformInfo) -> Availability {
        let availability = compute_availability(platform);
        self.availability.set(availability);
        availability
    }

    /// Permission set the viewer needs
    #[must_use]
    pub const fn permissions(&self) -> PermissionSet {
        self.permissions
    }

    /// Permission request launcher supplied by the host
    #[must_use]
    pub fn permission_controller(&self) -> &Arc<dyn PermissionController> {
        &self.permission_controller
    }

    /// Result of the last permission check made by guarded execution
    #[must_use]
    pub fn permissions_granted(&self) -> bool {
        self.permissions_granted.get()
    }

    /// Outcome of the last guarded execution
    #[must_use]
    pub fn execution_state(&self) -> ExecutionState {
        self.execution_state.get()
    }

    /// Observe execution state changes
    #[must_use]
    pub fn subscribe_execution_state(&self) -> watch::Receiver<ExecutionState> {
        self.execution_state.subscribe()
    }

    /// Launch the permission request flow for the required set
    ///
    /// # Errors
    ///
    /// Returns the provider fault if the request flow itself fails.
    pub async fn request_permissions(&self) -> ProviderResult<PermissionSet> {
        let granted = self
            .permission_controller
            .request_permissions(self.permissions)
            .await?;
        info!(requested = %self.permissions, %granted, "Permission request completed");
        Ok(granted)
    }

    /// Whether the granted set equals the required set exactly
    ///
    /// # Errors
    ///
    /// Returns the provider fault if the permission query fails.
    pub async fn has_all_permissions(&self) -> ProviderResult<bool> {
        let granted = self.provider.granted_permissions(self.permissions).await?;
        let all = PermissionSet::is_exactly_required(granted);
        debug!(%granted, all, "Checked granted permissions");
        Ok(all)
    }

    /// Latest weight in kilograms within `[start, end]`, 0.0 if none
    ///
    /// # Errors
    ///
    /// Returns the provider fault if the read fails.
    pub async fn read_weight(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ProviderResult<f64> {
        self.read_metric(MetricType::Weight, start, end).await
    }

    /// Latest height in meters within `[start, end]`, 0.0 if none
    ///
    /// # Errors
    ///
    /// Returns the provider fault if the read fails.
    pub async fn read_height(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ProviderResult<f64> {
        self.read_metric(MetricType::Height, start, end).await
    }

    /// Latest body fat percentage within `[start, end]`, 0.0 if none
    ///
    /// # Errors
    ///
    /// Returns the provider fault if the read fails.
    pub async fn read_body_fat(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ProviderResult<f64> {
        self.read_metric(MetricType::BodyFat, start, end).await
    }

    /// Latest basal metabolic rate in kcal/day within `[start, end]`, 0.0 if none
    ///
    /// # Errors
    ///
    /// Returns the provider fault if the read fails.
    pub async fn read_basal_metabolic_rate(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ProviderResult<f64> {
        self.read_metric(MetricType::BasalMetabolicRate, start, end).await
    }

    /// Energy of the latest nutrition record within `[start, end]`, 0.0 if none
    ///
    /// Unlike the other readers, a latest record without an energy value is not
    /// read as zero.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::MissingField` if the latest nutrition record has
    /// no energy value, or the provider fault if the read fails.
    pub async fn read_nutrition(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ProviderResult<f64> {
        self.read_metric(MetricType::Nutrition, start, end).await
    }

    /// Scalar of the latest `metric` record within `[start, end]`, 0.0 if none
    ///
    /// # Errors
    ///
    /// Returns the provider fault if the read fails, `IllegalState` if the
    /// provider answers with a record of another type, and `MissingField` for
    /// a nutrition record without energy.
    pub async fn read_metric(
        &self,
        metric: MetricType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ProviderResult<f64> {
        let request = ReadRecordsRequest::new(metric, TimeRangeFilter::between(start, end));
        let response = self.provider.read_records(&request).await?;

        let Some(latest) = response.last() else {
            debug!(%metric, "No records in range, reading as zero");
            return Ok(0.0);
        };

        let value = self.scalar(metric, latest)?;
        debug!(
            %metric,
            records = response.records.len(),
            value,
            recorded_at = %latest.time,
            "Read latest record"
        );
        Ok(value)
    }

    fn scalar(&self, metric: MetricType, record: &HealthRecord) -> ProviderResult<f64> {
        match record.value {
            RecordValue::Weight { kilograms } if metric == MetricType::Weight => Ok(kilograms),
            RecordValue::Height { meters } if metric == MetricType::Height => Ok(meters),
            RecordValue::BodyFat { percentage } if metric == MetricType::BodyFat => Ok(percentage),
            RecordValue::BasalMetabolicRate {
                kilocalories_per_day,
            } if metric == MetricType::BasalMetabolicRate => Ok(kilocalories_per_day),
            RecordValue::Nutrition {
                energy_kilocalories,
            } if metric == MetricType::Nutrition => {
                energy_kilocalories.ok_or(ProviderError::MissingField {
                    record: metric.record_name(),
                    field: "energy",
                })
            }
            other => Err(ProviderError::illegal_state(
                self.provider.name(),
                format!(
                    "requested {} but received {}",
                    metric.record_name(),
                    other.metric().record_name()
                ),
            )),
        }
    }

    /// Read all five metrics for `[start, end]` concurrently
    ///
    /// # Errors
    ///
    /// Returns the first fault raised by any of the reads.
    pub async fn read_body_composition(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ProviderResult<BodyComposition> {
        let (weight_kg, height_m, body_fat_percentage, basal_metabolic_rate_kcal, energy_kcal) =
            tokio::try_join!(
                self.read_weight(start, end),
                self.read_height(start, end),
                self.read_body_fat(start, end),
                self.read_basal_metabolic_rate(start, end),
                self.read_nutrition(start, end),
            )?;

        Ok(BodyComposition {
            weight_kg,
            height_m,
            body_fat_percentage,
            basal_metabolic_rate_kcal,
            energy_kcal,
        })
    }

    /// Run `action` only when all permissions are granted
    ///
    /// Permissions are re-queried before every run. A denied check skips the
    /// action without an error and still marks the state `Done`. Remote-call,
    /// security, I/O and illegal-state faults raised by the action are recorded
    /// as `ExecutionState::Error` with a fresh correlation id.
    ///
    /// # Errors
    ///
    /// Faults outside those four categories, and any fault from the permission
    /// re-check itself, are returned unchanged and leave the state untouched.
    pub async fn try_with_permissions_check<F, Fut>(&self, action: F) -> ProviderResult<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProviderResult<()>>,
    {
        let granted = self.has_all_permissions().await?;
        self.permissions_granted.set(granted);

        let outcome = if granted {
            action().await
        } else {
            info!("Required permissions missing, skipping guarded action");
            Ok(())
        };

        match outcome {
            Ok(()) => {
                self.execution_state.set(ExecutionState::Done);
                Ok(())
            }
            Err(fault) if fault.is_recoverable() => {
                let correlation_id = Uuid::new_v4();
                warn!(
                    %correlation_id,
                    category = ?fault.category(),
                    error = %fault,
                    "Guarded action failed"
                );
                self.execution_state.set(ExecutionState::error(fault, correlation_id));
                Ok(())
            }
            Err(fault) => {
                error!(
                    category = ?fault.category(),
                    error = %fault,
                    "Guarded action raised an unrecoverable fault"
                );
                Err(fault)
            }
        }
    }
}
