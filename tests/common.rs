// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, manager construction, and recording viewer hosts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `bia_viewer`

use bia_providers::{PlatformInfo, SyntheticHealthProvider};
use bia_viewer::formatters::{BodyCompositionReport, DecimalFormat};
use bia_viewer::health_connect::HealthConnectManager;
use bia_viewer::viewer::{BiaViewer, Notifier, ViewerNotice, ViewerSink};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// A supported device with the provider installed
pub const fn supported_platform() -> PlatformInfo {
    PlatformInfo {
        sdk_version: 34,
        provider_installed: true,
    }
}

/// Fixed instant the tests measure against
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 7, 30, 0).unwrap()
}

/// `[base - 1 day, base]`
pub fn day_range() -> (DateTime<Utc>, DateTime<Utc>) {
    (base_time() - Duration::days(1), base_time())
}

/// Manager over `provider`, which also answers permission requests
pub fn manager_for(provider: &Arc<SyntheticHealthProvider>) -> HealthConnectManager {
    init_test_logging();
    HealthConnectManager::new(supported_platform(), provider.clone(), provider.clone())
}

/// Notifier that remembers every notice
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<ViewerNotice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<ViewerNotice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &ViewerNotice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

/// Sink that remembers every published report
#[derive(Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<BodyCompositionReport>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<BodyCompositionReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl ViewerSink for RecordingSink {
    fn publish(&self, report: &BodyCompositionReport) {
        self.reports.lock().unwrap().push(report.clone());
    }
}

/// Viewer wired to recording hosts
pub struct TestViewer {
    pub viewer: BiaViewer,
    pub notifier: Arc<RecordingNotifier>,
    pub sink: Arc<RecordingSink>,
}

/// Viewer over `provider` on `platform`
pub fn viewer_for(provider: &Arc<SyntheticHealthProvider>, platform: PlatformInfo) -> TestViewer {
    init_test_logging();
    let manager = Arc::new(HealthConnectManager::new(
        platform,
        provider.clone(),
        provider.clone(),
    ));
    let notifier = Arc::new(RecordingNotifier::default());
    let sink = Arc::new(RecordingSink::default());
    let viewer = BiaViewer::new(
        manager,
        notifier.clone(),
        sink.clone(),
        DecimalFormat::default(),
    );
    TestViewer {
        viewer,
        notifier,
        sink,
    }
}
