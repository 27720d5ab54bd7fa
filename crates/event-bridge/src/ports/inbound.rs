//! Inbound Ports (Driving Ports)
//!
//! The API channel infrastructure uses to hand messages to the bridge.
//! Bus-originated events arrive through [`bridge_bus::EventHandler`].

use async_trait::async_trait;
use bridge_types::Message;

use crate::error::BridgeError;

/// Consumer of channel messages.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Process one message.
    ///
    /// Errors propagate to the channel infrastructure; the bridge never
    /// retries.
    async fn handle_message(&self, message: Message) -> Result<(), BridgeError>;
}
