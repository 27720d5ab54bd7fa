//! # Message Envelope
//!
//! The point-to-point envelope delivered over channels: a payload, a header
//! map, an id and a creation timestamp.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::value::{Fault, Value};

/// Header map. Keys are unique; order carries no meaning.
pub type Headers = HashMap<String, Value>;

/// An immutable channel message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: Uuid,
    timestamp: u64,
    headers: Headers,
    payload: Value,
}

impl Message {
    /// Create a message with no headers.
    pub fn new(payload: impl Into<Value>) -> Self {
        Self::builder(payload).build()
    }

    /// Create a fault message carrying `fault` as its payload.
    pub fn error(fault: Fault) -> Self {
        Self::new(fault)
    }

    /// Start building a message around `payload`.
    pub fn builder(payload: impl Into<Value>) -> MessageBuilder {
        MessageBuilder::new(payload)
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation time in milliseconds since the UNIX epoch.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    #[must_use]
    pub fn header(&self, key: &str) -> Option<&Value> {
        self.headers.get(key)
    }

    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// True if the payload is an error object.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self.payload, Value::Fault(_))
    }

    /// The error object, for fault messages.
    #[must_use]
    pub fn fault(&self) -> Option<&Fault> {
        self.payload.as_fault()
    }
}

/// Builder for [`Message`].
#[derive(Debug)]
pub struct MessageBuilder {
    payload: Value,
    headers: Headers,
    timestamp: Option<u64>,
}

impl MessageBuilder {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            payload: payload.into(),
            headers: Headers::new(),
            timestamp: None,
        }
    }

    /// Set a single header, replacing any previous value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Copy every entry of `headers`, replacing existing keys.
    pub fn copy_headers<I, K>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// Override the creation timestamp (ms since epoch).
    pub fn timestamp(mut self, millis: u64) -> Self {
        self.timestamp = Some(millis);
        self
    }

    pub fn build(self) -> Message {
        Message {
            id: Uuid::new_v4(),
            timestamp: self.timestamp.unwrap_or_else(now_millis),
            headers: self.headers,
            payload: self.payload,
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
