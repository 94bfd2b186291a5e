// ABOUTME: Observable state containers for availability and guarded execution outcome
// ABOUTME: Wraps tokio watch channels and defines the ExecutionState tagged union
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ProviderError;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Live-updating value that presentation code can read or subscribe to
///
/// Writes never fail, even while nobody is subscribed.
#[derive(Debug)]
pub struct StateCell<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> StateCell<T> {
    /// Create a cell holding `initial`
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self { sender }
    }

    /// Current value
    #[must_use]
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Receiver that observes every subsequent change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

/// Outcome of the last guarded execution
#[derive(Debug, Clone, Default)]
pub enum ExecutionState {
    /// Nothing has run yet
    #[default]
    Uninitialized,
    /// Last run completed, or was skipped for missing permissions
    Done,
    /// Last run hit a recoverable provider fault
    Error {
        /// Fault that ended the run
        cause: Arc<ProviderError>,
        /// Fresh id for this occurrence
        correlation_id: Uuid,
    },
}

impl ExecutionState {
    /// Error state for `cause`, tagged with the id already used to log it
    #[must_use]
    pub fn error(cause: ProviderError, correlation_id: Uuid) -> Self {
        Self::Error {
            cause: Arc::new(cause),
            correlation_id,
        }
    }

    /// Whether the last run finished without a fault
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Whether the last run recorded a fault
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Correlation id of the recorded fault
    #[must_use]
    pub const fn correlation_id(&self) -> Option<Uuid> {
        match self {
            Self::Error { correlation_id, .. } => Some(*correlation_id),
            _ => None,
        }
    }

    /// Recorded fault
    #[must_use]
    pub fn cause(&self) -> Option<&ProviderError> {
        match self {
            Self::Error { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let cell = StateCell::new(ExecutionState::Uninitialized);
        let mut receiver = cell.subscribe();

        cell.set(ExecutionState::Done);
        receiver.changed().await.unwrap();
        assert!(receiver.borrow().is_done());
        assert!(cell.get().is_done());
    }

    #[test]
    fn test_set_without_subscribers() {
        let cell = StateCell::new(0_u32);
        cell.set(7);
        assert_eq!(cell.get(), 7);
    }

    #[test]
    fn test_error_keeps_given_correlation_id() {
        let id = Uuid::new_v4();
        let state = ExecutionState::error(ProviderError::remote_call("p", "a"), id);
        assert!(state.is_error());
        assert_eq!(state.correlation_id(), Some(id));
        assert!(state.cause().is_some());
        assert!(ExecutionState::Done.correlation_id().is_none());
    }
}
