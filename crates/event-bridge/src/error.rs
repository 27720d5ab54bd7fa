//! Error types for the bridge.

use bridge_bus::BusError;
use bridge_types::EventError;
use thiserror::Error;

/// Errors raised while bridging messages and events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A required setting is missing or unusable (no topic, no bus).
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid delivery mode: {0}")]
    InvalidDeliveryMode(String),

    /// The bus refused or failed the dispatch.
    #[error("Delivery error: {0}")]
    Delivery(#[from] BusError),

    /// The downstream channel refused the message.
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

impl From<EventError> for BridgeError {
    fn from(err: EventError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Errors from a downstream message channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The channel is at capacity.
    #[error("channel full")]
    Full,

    /// The receiving side is gone.
    #[error("channel closed")]
    Closed,
}
