//! Bus error types.

use thiserror::Error;

/// Errors surfaced by the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// The bus no longer accepts events.
    #[error("Event bus closed")]
    Closed,

    /// A handler rejected an event.
    #[error("Handler failed for topic {topic}: {reason}")]
    Handler { topic: String, reason: String },

    /// The event could not be handed to the delivery machinery.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}
