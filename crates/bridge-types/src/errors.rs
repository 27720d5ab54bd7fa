//! # Error Types
//!
//! Errors raised while constructing envelopes or driving lifecycles.

use thiserror::Error;

/// Errors raised by [`crate::Event`] construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The topic was empty or whitespace only.
    #[error("topic is required")]
    TopicRequired,
}

/// Errors raised by a component's start/stop hooks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The component could not be started.
    #[error("{component} failed to start: {reason}")]
    StartFailed {
        component: &'static str,
        reason: String,
    },
}
