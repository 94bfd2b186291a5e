// ABOUTME: BIA viewer CLI - reads today's body composition metrics from a record fixture
// ABOUTME: Runs the status, connect, and refresh flows against the synthetic provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Show availability and permission state
//! bia-viewer --records records.json status
//!
//! # Run the permission flow, granting everything that is requested
//! bia-viewer --records records.json connect
//!
//! # Refresh today's readings with two fraction digits, as JSON
//! bia-viewer --records records.json --grant all --digits 2 --format json refresh
//!
//! # Pretend the device is too old
//! bia-viewer --sdk 26 refresh
//! ```

use bia_providers::{PermissionRequestBehavior, PlatformInfo, SyntheticHealthProvider};
use bia_viewer::config::ViewerConfig;
use bia_viewer::constants::platform;
use bia_viewer::errors::{AppError, AppResult, ErrorCode};
use bia_viewer::formatters::{BodyCompositionReport, OutputFormat};
use bia_viewer::health_connect::{Availability, ExecutionState, HealthConnectManager};
use bia_viewer::logging::LoggingConfig;
use bia_viewer::models::MetricType;
use bia_viewer::permissions::PermissionSet;
use bia_viewer::viewer::{BiaViewer, Notifier, ViewerNotice, ViewerSink};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Parser)]
#[command(
    name = "bia-viewer",
    about = "BIA body composition viewer",
    long_about = "Reads today's weight, height, body fat, BMR and calories from a health data provider and prints a formatted report."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Platform SDK level override
    #[arg(long, global = true)]
    sdk: Option<u32>,

    /// Whether the health data provider is installed
    #[arg(long, global = true)]
    provider_installed: Option<bool>,

    /// JSON record fixture served by the synthetic provider
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    /// Permissions granted before the command runs: all, none, or a comma list
    /// of metrics / platform permission names
    #[arg(long, global = true, value_parser = parse_permissions, default_value = "none")]
    grant: PermissionSet,

    /// Permissions the user grants when asked: all, none, or a comma list
    #[arg(long, global = true, value_parser = parse_permissions, default_value = "all")]
    answer: PermissionSet,

    /// Fraction digits shown for every reading
    #[arg(long, global = true)]
    digits: Option<usize>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show availability and permission state
    Status,
    /// Run the permission flow and read the data when it succeeds
    Connect,
    /// Read and print today's readings
    Refresh,
}

fn parse_permissions(value: &str) -> Result<PermissionSet, String> {
    match value.trim() {
        "all" => return Ok(PermissionSet::required()),
        "none" | "" => return Ok(PermissionSet::empty()),
        _ => {}
    }

    value
        .split(',')
        .map(str::trim)
        .try_fold(PermissionSet::empty(), |set, item| {
            MetricType::ALL
                .iter()
                .find(|metric| metric.to_string() == item)
                .map(|metric| PermissionSet::read(*metric))
                .or_else(|| PermissionSet::from_token(item))
                .map(|permission| set | permission)
                .ok_or_else(|| format!("unknown permission '{item}'"))
        })
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: &ViewerNotice) {
        eprintln!("{notice}");
    }
}

struct StdoutSink {
    format: OutputFormat,
}

impl ViewerSink for StdoutSink {
    fn publish(&self, report: &BodyCompositionReport) {
        match report.render(self.format) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => error!(error = %e, "Failed to render report"),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::from_env().with_level("debug")
    } else {
        LoggingConfig::from_env()
    };
    if let Err(e) = logging.init() {
        eprintln!("{e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.code.exit_status())
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = ViewerConfig::from_env()?;
    if let Some(sdk) = cli.sdk {
        config.platform.sdk_version = sdk;
    }
    if let Some(installed) = cli.provider_installed {
        config.platform.provider_installed = installed;
    }
    if let Some(digits) = cli.digits {
        config.decimal_digits = digits;
    }
    if cli.records.is_some() {
        config.records_file = cli.records;
    }
    debug!(?config, "Effective configuration");

    let provider = match &config.records_file {
        Some(path) => SyntheticHealthProvider::from_json_file(path)?,
        None => SyntheticHealthProvider::new(),
    }
    .granting(cli.grant)
    .answering_requests(PermissionRequestBehavior::Grant(cli.answer));
    let provider = Arc::new(provider);

    let manager = Arc::new(HealthConnectManager::new(
        config.platform,
        provider.clone(),
        provider,
    ));
    let format = OutputFormat::from_str_param(&cli.format);

    match cli.command {
        Command::Status => print_status(&manager, config.platform, format).await,
        Command::Connect | Command::Refresh => {
            let viewer = BiaViewer::new(
                Arc::clone(&manager),
                Arc::new(StderrNotifier),
                Arc::new(StdoutSink { format }),
                config.decimal_format(),
            );
            if matches!(cli.command, Command::Connect) {
                viewer.connect().await?;
            } else {
                viewer.refresh().await?;
            }
            outcome(&manager).await
        }
    }
}

async fn print_status(
    manager: &HealthConnectManager,
    platform_info: PlatformInfo,
    format: OutputFormat,
) -> AppResult<()> {
    let availability = manager.availability();
    let granted = if availability.is_installed() {
        Some(manager.has_all_permissions().await?)
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let status = json!({
                "platform": platform_info,
                "availability": availability,
                "permissions_granted": granted,
                "required_permissions": manager.permissions().tokens(),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Text => {
            println!("Availability   {availability}");
            match granted {
                Some(true) => println!("Permissions    granted"),
                Some(false) => println!("Permissions    missing"),
                None => println!("Permissions    unknown"),
            }
            for token in manager.permissions().tokens() {
                println!("  {token}");
            }
        }
    }
    Ok(())
}

/// Translate the flow's end state into the process result
async fn outcome(manager: &HealthConnectManager) -> AppResult<()> {
    match manager.availability() {
        Availability::NotSupported => {
            return Err(AppError::new(
                ErrorCode::PlatformNotSupported,
                format!("requires SDK {} or later", platform::MIN_SUPPORTED_SDK),
            ))
        }
        Availability::NotInstalled => {
            return Err(AppError::new(
                ErrorCode::ProviderNotInstalled,
                "install Health Connect and retry",
            ))
        }
        Availability::Installed => {}
    }

    if let ExecutionState::Error {
        cause,
        correlation_id,
    } = manager.execution_state()
    {
        return Err(
            AppError::new(ErrorCode::for_fault(cause.category()), cause.to_string())
                .with_correlation_id(correlation_id),
        );
    }

    if manager.has_all_permissions().await? {
        Ok(())
    } else {
        Err(AppError::permission_denied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_permissions() {
        assert_eq!(parse_permissions("all").unwrap(), PermissionSet::required());
        assert!(parse_permissions("none").unwrap().is_empty());
        assert_eq!(
            parse_permissions("weight, body_fat").unwrap(),
            PermissionSet::READ_WEIGHT | PermissionSet::READ_BODY_FAT
        );
        assert_eq!(
            parse_permissions("android.permission.health.WRITE_WEIGHT").unwrap(),
            PermissionSet::WRITE_WEIGHT
        );
        assert!(parse_permissions("steps").is_err());
    }
}
