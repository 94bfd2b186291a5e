// ABOUTME: Fault taxonomy for calls into the health data provider
// ABOUTME: Classifies provider errors into categories the guarded executor can recover from
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Provider Error Types
//!
//! Every call into the out-of-process health data provider can fail. The
//! failures are grouped into [`FaultCategory`] values; only the
//! environment, permission and illegal-state categories are recoverable by
//! the guarded executor; the rest propagate to the caller.

use std::io;

/// Category of a provider fault
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCategory {
    /// The binder/remote call to the provider failed
    RemoteCall,
    /// A permission was revoked while the call was in flight
    Security,
    /// I/O failure while exchanging data with the provider
    Io,
    /// Provider used in the wrong state (e.g. before the availability check)
    IllegalState,
    /// A field the caller asserted to be present was absent
    MissingField,
    /// Local provider setup is invalid
    Configuration,
}

impl FaultCategory {
    /// Whether the guarded executor records this fault instead of propagating it
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        matches!(
            self,
            Self::RemoteCall | Self::Security | Self::Io | Self::IllegalState
        )
    }
}

/// Errors returned by health data provider operations
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Remote call into the provider process failed
    #[error("Remote call to {provider} failed: {details}")]
    RemoteCall {
        /// Provider name
        provider: String,
        /// Failure details
        details: String,
    },

    /// Permission revoked or never granted for the requested data
    #[error("Security exception from {provider}: {details}")]
    Security {
        /// Provider name
        provider: String,
        /// Failure details
        details: String,
    },

    /// I/O failure while talking to the provider
    #[error("I/O failure talking to {provider}")]
    Io {
        /// Provider name
        provider: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Provider was called in a state that does not allow the operation
    #[error("Illegal state in {provider}: {details}")]
    IllegalState {
        /// Provider name
        provider: String,
        /// Failure details
        details: String,
    },

    /// A record field that must be present was absent
    #[error("{record} has no value for required field '{field}'")]
    MissingField {
        /// Record type name
        record: &'static str,
        /// Field name
        field: &'static str,
    },

    /// Provider setup is invalid (bad fixture, poisoned lock, ...)
    #[error("Provider {provider} configuration error: {details}")]
    ConfigurationError {
        /// Provider name
        provider: String,
        /// Failure details
        details: String,
    },
}

impl ProviderError {
    /// Remote call failure
    #[must_use]
    pub fn remote_call(provider: impl Into<String>, details: impl Into<String>) -> Self {
        Self::RemoteCall {
            provider: provider.into(),
            details: details.into(),
        }
    }

    /// Security exception
    #[must_use]
    pub fn security(provider: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Security {
            provider: provider.into(),
            details: details.into(),
        }
    }

    /// I/O failure
    #[must_use]
    pub fn io(provider: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            provider: provider.into(),
            source,
        }
    }

    /// Illegal state
    #[must_use]
    pub fn illegal_state(provider: impl Into<String>, details: impl Into<String>) -> Self {
        Self::IllegalState {
            provider: provider.into(),
            details: details.into(),
        }
    }

    /// Category used by the guarded executor
    #[must_use]
    pub const fn category(&self) -> FaultCategory {
        match self {
            Self::RemoteCall { .. } => FaultCategory::RemoteCall,
            Self::Security { .. } => FaultCategory::Security,
            Self::Io { .. } => FaultCategory::Io,
            Self::IllegalState { .. } => FaultCategory::IllegalState,
            Self::MissingField { .. } => FaultCategory::MissingField,
            Self::ConfigurationError { .. } => FaultCategory::Configuration,
        }
    }

    /// Shorthand for `self.category().is_recoverable()`
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.category().is_recoverable()
    }
}

/// Result alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
