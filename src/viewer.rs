// ABOUTME: Single-screen viewer controller driving availability, permission, and refresh flows
// ABOUTME: Publishes formatted body composition reports and user notices through host traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Viewer Controller
//!
//! Presentation glue around [`HealthConnectManager`]. The host supplies two
//! capabilities:
//!
//! - [`Notifier`]: transient user notices (a toast on device, stderr in the CLI)
//! - [`ViewerSink`]: receives each refreshed [`BodyCompositionReport`]
//!
//! Flows:
//!
//! - **startup**: availability check, then a silent permission check and a
//!   silent read
//! - **connect**: availability check, then the permission check that launches
//!   the request flow when something is missing
//! - **refresh**: availability check, then read if permitted

use crate::constants::platform;
use crate::errors::ProviderResult;
use crate::formatters::{BodyCompositionReport, DecimalFormat};
use crate::health_connect::{Availability, HealthConnectManager};
use crate::models::BodyComposition;
use chrono::{DateTime, Local, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

/// Notice shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerNotice {
    /// Platform too old for the health data provider
    NotSupported {
        /// Lowest supported SDK level
        min_sdk: u32,
    },
    /// Provider missing from the device
    NotInstalled,
    /// All permissions already granted
    PermissionsGranted,
    /// The permission request ended without the full set
    PermissionDenied,
    /// A refresh found permissions missing
    PermissionDeniedShort,
    /// Provider fault during a permission flow
    Error(String),
}

impl fmt::Display for ViewerNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported { min_sdk } => write!(
                f,
                "Health Connect is not supported on this device (requires SDK {min_sdk} or later)"
            ),
            Self::NotInstalled => f.write_str("Health Connect is not installed"),
            Self::PermissionsGranted => f.write_str("All permissions are granted"),
            Self::PermissionDenied => f.write_str(
                "Permission denied. Grant access to weight, height, body fat, BMR and nutrition",
            ),
            Self::PermissionDeniedShort => f.write_str("Permission denied"),
            Self::Error(fault) => write!(f, "Error: {fault}"),
        }
    }
}

/// Transient user notifications
pub trait Notifier: Send + Sync {
    /// Show `notice` to the user
    fn notify(&self, notice: &ViewerNotice);
}

/// Receiver of refreshed readings
pub trait ViewerSink: Send + Sync {
    /// Display `report`
    fn publish(&self, report: &BodyCompositionReport);
}

/// Controller for the single viewer screen
pub struct BiaViewer {
    manager: Arc<HealthConnectManager>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn ViewerSink>,
    format: DecimalFormat,
}

impl BiaViewer {
    /// Create a controller
    #[must_use]
    pub fn new(
        manager: Arc<HealthConnectManager>,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn ViewerSink>,
        format: DecimalFormat,
    ) -> Self {
        Self {
            manager,
            notifier,
            sink,
            format,
        }
    }

    /// Underlying manager
    #[must_use]
    pub const fn manager(&self) -> &Arc<HealthConnectManager> {
        &self.manager
    }

    /// Whether the provider can be used, notifying the user when it cannot
    pub fn check_availability(&self) -> bool {
        match self.manager.availability() {
            Availability::NotSupported => {
                self.notifier.notify(&ViewerNotice::NotSupported {
                    min_sdk: platform::MIN_SUPPORTED_SDK,
                });
                false
            }
            Availability::NotInstalled => {
                self.notifier.notify(&ViewerNotice::NotInstalled);
                false
            }
            Availability::Installed => true,
        }
    }

    /// Launch the permission request when anything is missing
    ///
    /// With everything granted this only reports it (if `show_info`). After a
    /// request, the data is read only when the user granted something and a
    /// fresh check confirms the full set.
    ///
    /// # Errors
    ///
    /// Permission faults are notified, not returned. Unrecoverable faults from
    /// the follow-up read are returned.
    pub async fn check_permissions(&self, show_info: bool) -> ProviderResult<()> {
        let granted = match self.manager.has_all_permissions().await {
            Ok(granted) => granted,
            Err(fault) => {
                self.report_fault(&fault.to_string());
                return Ok(());
            }
        };

        if granted {
            if show_info {
                self.notifier.notify(&ViewerNotice::PermissionsGranted);
            }
            return Ok(());
        }

        let confirmed = match self.request_and_confirm().await {
            Ok(confirmed) => confirmed,
            Err(fault) => {
                self.report_fault(&fault.to_string());
                return Ok(());
            }
        };

        if confirmed {
            info!("Permissions successfully granted");
            self.read_all_data().await?;
        } else {
            self.notifier.notify(&ViewerNotice::PermissionDenied);
        }
        Ok(())
    }

    async fn request_and_confirm(&self) -> ProviderResult<bool> {
        let granted = self.manager.request_permissions().await?;
        if granted.is_empty() {
            return Ok(false);
        }
        self.manager.has_all_permissions().await
    }

    /// Read everything if permitted; otherwise notify when `show_info`
    ///
    /// # Errors
    ///
    /// Permission faults are notified, not returned. Unrecoverable faults from
    /// the read are returned.
    pub async fn check_permissions_and_run(&self, show_info: bool) -> ProviderResult<()> {
        match self.manager.has_all_permissions().await {
            Ok(true) => self.read_all_data().await.map(|_| ()),
            Ok(false) => {
                if show_info {
                    self.notifier.notify(&ViewerNotice::PermissionDeniedShort);
                }
                Ok(())
            }
            Err(fault) => {
                self.report_fault(&fault.to_string());
                Ok(())
            }
        }
    }

    /// Refresh button: availability check, then read if permitted
    ///
    /// # Errors
    ///
    /// Returns unrecoverable faults from the read.
    pub async fn refresh(&self) -> ProviderResult<()> {
        if self.check_availability() {
            self.check_permissions_and_run(true).await?;
        }
        Ok(())
    }

    /// Connect menu entry: availability check, then the permission flow
    ///
    /// # Errors
    ///
    /// Returns unrecoverable faults from the follow-up read.
    pub async fn connect(&self) -> ProviderResult<()> {
        if self.check_availability() {
            self.check_permissions(true).await?;
        }
        Ok(())
    }

    /// First screen load: silent permission flow and silent read
    ///
    /// # Errors
    ///
    /// Returns unrecoverable faults from either read.
    pub async fn startup(&self) -> ProviderResult<()> {
        if self.check_availability() {
            self.check_permissions(false).await?;
            self.check_permissions_and_run(false).await?;
        }
        Ok(())
    }

    /// Read today's metrics, from local midnight until now
    ///
    /// # Errors
    ///
    /// Returns unrecoverable faults raised by the guarded read.
    pub async fn read_all_data(&self) -> ProviderResult<Option<BodyCompositionReport>> {
        let now = Local::now();
        self.read_all_data_between(start_of_day(now), now.with_timezone(&Utc))
            .await
    }

    /// Read all metrics for `[start, end]` under the permission guard
    ///
    /// Publishes and returns the report when the guarded read completed. A
    /// skipped or failed read publishes nothing; the outcome is in the
    /// manager's execution state.
    ///
    /// # Errors
    ///
    /// Returns unrecoverable faults raised by the guarded read.
    pub async fn read_all_data_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ProviderResult<Option<BodyCompositionReport>> {
        let mut readings: Option<BodyComposition> = None;
        let slot = &mut readings;
        let manager = &self.manager;

        manager
            .try_with_permissions_check(|| async move {
                *slot = Some(manager.read_body_composition(start, end).await?);
                Ok(())
            })
            .await?;

        Ok(readings.map(|readings| {
            let report = BodyCompositionReport::new(readings, self.format);
            self.sink.publish(&report);
            report
        }))
    }

    fn report_fault(&self, fault: &str) {
        error!(error = %fault, "Permission flow failed");
        self.notifier.notify(&ViewerNotice::Error(fault.to_owned()));
    }
}

/// Local midnight of `now`'s day, as UTC
///
/// Falls back to `now` when local midnight does not exist (a DST gap at 00:00).
#[must_use]
pub fn start_of_day(now: DateTime<Local>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(Local).earliest())
        .unwrap_or(now)
        .with_timezone(&Utc)
}
