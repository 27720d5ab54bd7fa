//! Envelope mapping: channel message to bus event.
//!
//! The mapped event's properties are a copy of the message headers plus:
//!
//! | Key | Value |
//! |-----|-------|
//! | `timestamp` | message creation time (ms since epoch) |
//! | `exception` | the error object (fault messages only) |
//! | `exception-class` | the error's type name (fault messages only) |
//! | `exception-message` | the error's display text (fault messages only) |
//! | `event` | the complete source message |

use std::sync::Arc;

use bridge_types::{headers, Event, Message, Properties, Value};
use tracing::trace;

use crate::error::BridgeError;

/// Converts a channel message into a bus event.
pub trait MessageEventMapper: Send + Sync {
    fn to_event(&self, message: &Message) -> Result<Event, BridgeError>;
}

impl<F> MessageEventMapper for F
where
    F: Fn(&Message) -> Result<Event, BridgeError> + Send + Sync,
{
    fn to_event(&self, message: &Message) -> Result<Event, BridgeError> {
        self(message)
    }
}

/// The standard mapper.
///
/// The topic comes from the message's `topic` header; a missing, blank or
/// non-string header falls back to the configured default topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultMessageEventMapper {
    default_topic: Option<String>,
}

impl DefaultMessageEventMapper {
    pub fn new(default_topic: Option<String>) -> Self {
        Self { default_topic }
    }

    pub fn with_default_topic(topic: impl Into<String>) -> Self {
        Self::new(Some(topic.into()))
    }

    #[must_use]
    pub fn default_topic(&self) -> Option<&str> {
        self.default_topic.as_deref()
    }

    fn resolve_topic<'a>(&'a self, message: &'a Message) -> Result<&'a str, BridgeError> {
        message
            .header(headers::TOPIC)
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.default_topic
                    .as_deref()
                    .filter(|t| !t.trim().is_empty())
            })
            .ok_or_else(|| BridgeError::Configuration("topic is required".to_string()))
    }
}

impl MessageEventMapper for DefaultMessageEventMapper {
    fn to_event(&self, message: &Message) -> Result<Event, BridgeError> {
        let topic = self.resolve_topic(message)?;

        let mut properties: Properties = message.headers().clone();
        properties.insert(
            headers::TIMESTAMP.to_string(),
            Value::from(message.timestamp()),
        );

        if let Some(fault) = message.fault() {
            properties.insert(headers::EXCEPTION.to_string(), Value::Fault(fault.clone()));
            properties.insert(
                headers::EXCEPTION_CLASS.to_string(),
                Value::from(fault.type_name()),
            );
            properties.insert(
                headers::EXCEPTION_MESSAGE.to_string(),
                Value::from(fault.message()),
            );
        }

        properties.insert(
            headers::EVENT.to_string(),
            Value::Message(Arc::new(message.clone())),
        );

        trace!(
            message_id = %message.id(),
            topic,
            properties = properties.len(),
            "Message mapped to event"
        );

        Ok(Event::new(topic, properties)?)
    }
}
