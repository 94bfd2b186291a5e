// ABOUTME: Integration tests for the viewer controller flows
// ABOUTME: Covers availability notices, permission flows, and published reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use anyhow::Result;
use bia_providers::{PermissionRequestBehavior, PlatformInfo, SyntheticHealthProvider};
use bia_viewer::errors::FaultCategory;
use bia_viewer::models::HealthRecord;
use bia_viewer::permissions::PermissionSet;
use bia_viewer::viewer::ViewerNotice;
use chrono::Duration;
use common::{base_time, day_range, supported_platform, viewer_for};
use std::sync::Arc;

/// Readings taken at the fixed test instant, inside `day_range()`
fn fixed_records() -> Vec<HealthRecord> {
    let at = base_time();
    vec![
        HealthRecord::weight(at - Duration::seconds(2), 71.0),
        HealthRecord::weight(at, 70.0),
        HealthRecord::height(at, 1.75),
        HealthRecord::body_fat(at, 20.0),
        HealthRecord::basal_metabolic_rate(at, 1650.0),
        HealthRecord::nutrition(at, Some(540.0)),
    ]
}

#[tokio::test]
async fn test_unsupported_platform_notifies_minimum_sdk() -> Result<()> {
    let provider = Arc::new(SyntheticHealthProvider::new().granting(PermissionSet::required()));
    let test = viewer_for(
        &provider,
        PlatformInfo {
            sdk_version: 26,
            provider_installed: true,
        },
    );

    test.viewer.refresh().await?;

    assert_eq!(
        test.notifier.notices(),
        vec![ViewerNotice::NotSupported { min_sdk: 27 }]
    );
    assert_eq!(provider.read_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_provider_notifies_not_installed() -> Result<()> {
    let provider = Arc::new(SyntheticHealthProvider::new());
    let test = viewer_for(
        &provider,
        PlatformInfo {
            sdk_version: 34,
            provider_installed: false,
        },
    );

    test.viewer.connect().await?;

    assert_eq!(test.notifier.notices(), vec![ViewerNotice::NotInstalled]);
    Ok(())
}

#[tokio::test]
async fn test_refresh_with_denied_permissions_notifies() -> Result<()> {
    let provider = Arc::new(SyntheticHealthProvider::with_records(fixed_records()));
    let test = viewer_for(&provider, supported_platform());

    test.viewer.refresh().await?;

    assert_eq!(
        test.notifier.notices(),
        vec![ViewerNotice::PermissionDeniedShort]
    );
    assert!(test.sink.reports().is_empty());
    assert_eq!(provider.read_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_refresh_publishes_a_report() -> Result<()> {
    let provider = Arc::new(
        SyntheticHealthProvider::with_records(fixed_records()).granting(PermissionSet::required()),
    );
    let test = viewer_for(&provider, supported_platform());

    test.viewer.refresh().await?;

    // Today's range depends on the wall clock, so only the flow is checked here
    assert_eq!(test.sink.reports().len(), 1);
    assert!(test.notifier.notices().is_empty());
    assert!(test.viewer.manager().execution_state().is_done());
    Ok(())
}

#[tokio::test]
async fn test_read_all_data_between_publishes_formatted_report() -> Result<()> {
    let provider = Arc::new(
        SyntheticHealthProvider::with_records(fixed_records()).granting(PermissionSet::required()),
    );
    let test = viewer_for(&provider, supported_platform());
    let (start, end) = day_range();

    let report = test
        .viewer
        .read_all_data_between(start, end)
        .await?
        .unwrap();

    assert_eq!(test.sink.reports(), vec![report.clone()]);
    assert_eq!(report.weight, "70.0kg");
    assert_eq!(report.bmi, "22.9");
    assert_eq!(report.body_fat, "20.0%");
    assert_eq!(report.fat_mass, "14.0kg");
    assert_eq!(report.basal_metabolic_rate, "1,650.0kcal/day");
    assert_eq!(report.calories, "540.0KCal");
    assert!(test.notifier.notices().is_empty());
    assert!(test.viewer.manager().execution_state().is_done());
    Ok(())
}

#[tokio::test]
async fn test_connect_when_granted_reports_it() -> Result<()> {
    let provider = Arc::new(SyntheticHealthProvider::new().granting(PermissionSet::required()));
    let test = viewer_for(&provider, supported_platform());

    test.viewer.connect().await?;

    assert_eq!(
        test.notifier.notices(),
        vec![ViewerNotice::PermissionsGranted]
    );
    assert_eq!(provider.read_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_connect_requests_and_reads_after_grant() -> Result<()> {
    let provider = Arc::new(SyntheticHealthProvider::with_records(fixed_records()));
    let test = viewer_for(&provider, supported_platform());

    test.viewer.connect().await?;

    assert!(test.notifier.notices().is_empty());
    assert_eq!(test.sink.reports().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_connect_partial_grant_is_denied() -> Result<()> {
    let partial = PermissionSet::READ_WEIGHT | PermissionSet::READ_HEIGHT;
    let provider = Arc::new(
        SyntheticHealthProvider::with_records(fixed_records())
            .answering_requests(PermissionRequestBehavior::Grant(partial)),
    );
    let test = viewer_for(&provider, supported_platform());

    test.viewer.connect().await?;

    assert_eq!(test.notifier.notices(), vec![ViewerNotice::PermissionDenied]);
    assert!(test.sink.reports().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_connect_dismissed_dialog_is_denied() -> Result<()> {
    let provider = Arc::new(
        SyntheticHealthProvider::new().answering_requests(PermissionRequestBehavior::GrantNothing),
    );
    let test = viewer_for(&provider, supported_platform());

    test.viewer.connect().await?;

    assert_eq!(test.notifier.notices(), vec![ViewerNotice::PermissionDenied]);
    Ok(())
}

#[tokio::test]
async fn test_permission_fault_is_notified() -> Result<()> {
    let provider = Arc::new(SyntheticHealthProvider::new());
    provider.fail_permission_checks_with(Some(FaultCategory::RemoteCall))?;
    let test = viewer_for(&provider, supported_platform());

    test.viewer.refresh().await?;

    let notices = test.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].to_string().starts_with("Error: "));
    Ok(())
}

#[tokio::test]
async fn test_startup_is_silent_when_everything_is_granted() -> Result<()> {
    let provider = Arc::new(
        SyntheticHealthProvider::with_records(fixed_records()).granting(PermissionSet::required()),
    );
    let test = viewer_for(&provider, supported_platform());

    test.viewer.startup().await?;

    assert!(test.notifier.notices().is_empty());
    assert_eq!(test.sink.reports().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_read_fault_publishes_nothing() -> Result<()> {
    let provider = Arc::new(
        SyntheticHealthProvider::with_records(fixed_records()).granting(PermissionSet::required()),
    );
    provider.fail_reads_with(Some(FaultCategory::Io))?;
    let test = viewer_for(&provider, supported_platform());

    let (start, end) = day_range();
    let report = test.viewer.read_all_data_between(start, end).await?;

    assert!(report.is_none());
    assert!(test.sink.reports().is_empty());
    assert!(test.viewer.manager().execution_state().is_error());
    Ok(())
}
