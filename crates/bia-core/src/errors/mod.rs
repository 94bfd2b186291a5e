// ABOUTME: Unified error handling with error codes and structured context
// ABOUTME: Defines AppError, ErrorCode, and re-exports the provider fault taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Standard error codes and a single application error type so that the
//! viewer, configuration layer and CLI report failures consistently.

/// Health data provider fault taxonomy
pub mod provider;

pub use provider::{FaultCategory, ProviderError, ProviderResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Permissions (1000-1999)
    /// Required health permissions are not granted
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1000,

    // Platform (2000-2999)
    /// Platform version is below the minimum supported
    #[serde(rename = "PLATFORM_NOT_SUPPORTED")]
    PlatformNotSupported = 2000,
    /// Health data provider is not installed
    #[serde(rename = "PROVIDER_NOT_INSTALLED")]
    ProviderNotInstalled = 2001,

    // Validation (3000-3999)
    /// A required field is missing
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // External Services (5000-5999)
    /// The health data provider returned an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// The health data provider could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,

    // Configuration (6000-6999)
    /// Configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal error
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
}

impl ErrorCode {
    /// Code reported for a provider fault of `category`
    #[must_use]
    pub const fn for_fault(category: FaultCategory) -> Self {
        match category {
            FaultCategory::Security => Self::PermissionDenied,
            FaultCategory::RemoteCall | FaultCategory::Io => Self::ExternalServiceUnavailable,
            FaultCategory::MissingField => Self::MissingRequiredField,
            FaultCategory::Configuration => Self::ConfigInvalid,
            FaultCategory::IllegalState => Self::ExternalServiceError,
        }
    }

    /// Process exit status for the command-line host
    #[must_use]
    pub const fn exit_status(self) -> u8 {
        match self {
            Self::PermissionDenied => 3,
            Self::PlatformNotSupported | Self::ProviderNotInstalled => 4,
            Self::MissingRequiredField | Self::ConfigInvalid => 2,
            Self::ExternalServiceError | Self::ExternalServiceUnavailable => 5,
            Self::InternalError | Self::SerializationError => 1,
        }
    }

    /// User-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::PermissionDenied => "Health permissions were not granted",
            Self::PlatformNotSupported => "This platform version is not supported",
            Self::ProviderNotInstalled => "The health data provider is not installed",
            Self::MissingRequiredField => "A required field is missing",
            Self::ExternalServiceError => "The health data provider encountered an error",
            Self::ExternalServiceUnavailable => "The health data provider is unavailable",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Correlation id for tracing this occurrence in logs
    pub correlation_id: Option<Uuid>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            correlation_id: None,
            source: None,
        }
    }

    /// Attach a correlation id
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Permissions not granted
    #[must_use]
    pub fn permission_denied() -> Self {
        Self::new(
            ErrorCode::PermissionDenied,
            "Required health permissions are not granted",
        )
    }

    /// Invalid configuration
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)?;
        if let Some(id) = self.correlation_id {
            write!(f, " (correlation id {id})")?;
        }
        Ok(())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        Self::new(ErrorCode::for_fault(error.category()), error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_exit_status() {
        assert_eq!(ErrorCode::PermissionDenied.exit_status(), 3);
        assert_eq!(ErrorCode::ProviderNotInstalled.exit_status(), 4);
        assert_eq!(ErrorCode::InternalError.exit_status(), 1);
    }

    #[test]
    fn test_provider_error_conversion_keeps_source() {
        let error: AppError = ProviderError::security("health_connect", "revoked").into();
        assert_eq!(error.code, ErrorCode::PermissionDenied);
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("revoked"));
    }

    #[test]
    fn test_fault_categories_map_to_codes() {
        assert_eq!(
            ErrorCode::for_fault(FaultCategory::Security),
            ErrorCode::PermissionDenied
        );
        assert_eq!(ErrorCode::for_fault(FaultCategory::Security).exit_status(), 3);
        assert_eq!(
            ErrorCode::for_fault(FaultCategory::Io),
            ErrorCode::ExternalServiceUnavailable
        );
        assert_eq!(
            ErrorCode::for_fault(FaultCategory::IllegalState),
            ErrorCode::ExternalServiceError
        );
    }

    #[test]
    fn test_display_includes_correlation_id() {
        let id = Uuid::new_v4();
        let error = AppError::internal("boom").with_correlation_id(id);
        assert!(error.to_string().contains(&id.to_string()));
    }
}
