//! Outbound Ports (Driven Ports)
//!
//! Dependencies the bridge needs from its surroundings: a downstream channel
//! to emit messages into. The bus side is [`bridge_bus::EventBus`].

use bridge_types::Message;
use tokio::sync::mpsc;

use crate::error::ChannelError;

/// A channel that accepts messages without blocking.
pub trait MessageChannel: Send + Sync {
    /// Hand a message to the channel.
    ///
    /// Back-pressure and retry are the channel's concern; this call only
    /// reports whether the message was accepted.
    fn send(&self, message: Message) -> Result<(), ChannelError>;

    /// Whether the receiving side is gone for good.
    fn is_closed(&self) -> bool {
        false
    }
}

impl MessageChannel for mpsc::Sender<Message> {
    fn send(&self, message: Message) -> Result<(), ChannelError> {
        self.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => ChannelError::Full,
            mpsc::error::TrySendError::Closed(_) => ChannelError::Closed,
        })
    }

    fn is_closed(&self) -> bool {
        mpsc::Sender::is_closed(self)
    }
}

impl MessageChannel for mpsc::UnboundedSender<Message> {
    fn send(&self, message: Message) -> Result<(), ChannelError> {
        mpsc::UnboundedSender::send(self, message).map_err(|_| ChannelError::Closed)
    }

    fn is_closed(&self) -> bool {
        mpsc::UnboundedSender::is_closed(self)
    }
}

impl<C: MessageChannel + ?Sized> MessageChannel for std::sync::Arc<C> {
    fn send(&self, message: Message) -> Result<(), ChannelError> {
        (**self).send(message)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
