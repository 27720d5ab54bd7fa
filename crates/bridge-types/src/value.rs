//! # Values
//!
//! The value model carried by payloads, message headers and event properties.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::event::Event;
use crate::message::Message;

/// A payload, header value or event property.
///
/// Plain data travels as JSON. Errors, whole messages and whole events are
/// carried by reference so that downstream consumers see the original object.
#[derive(Debug, Clone)]
pub enum Value {
    /// Plain data.
    Json(serde_json::Value),
    /// An error object (the payload of a fault message).
    Fault(Fault),
    /// A complete message envelope.
    Message(Arc<Message>),
    /// A complete bus event.
    Event(Arc<Event>),
}

impl Value {
    /// Returns the string slice if this is a JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Json(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the JSON value if this is plain data.
    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the number if this is a JSON unsigned integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_json().and_then(serde_json::Value::as_u64)
    }

    #[must_use]
    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Fault(a), Self::Fault(b)) => a == b,
            (Self::Message(a), Self::Message(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Event(a), Self::Event(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Json(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Json(serde_json::Value::String(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Json(serde_json::Value::Bool(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Json(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Json(value.into())
    }
}

impl From<Fault> for Value {
    fn from(value: Fault) -> Self {
        Self::Fault(value)
    }
}

impl From<Message> for Value {
    fn from(value: Message) -> Self {
        Self::Message(Arc::new(value))
    }
}

impl From<Event> for Value {
    fn from(value: Event) -> Self {
        Self::Event(Arc::new(value))
    }
}

/// An error object travelling as a payload or property.
///
/// The concrete type name is captured at construction, since it cannot be
/// recovered from a `dyn Error` afterwards. Clones share the same error;
/// equality is identity of that shared error.
#[derive(Clone)]
pub struct Fault {
    error: Arc<dyn Error + Send + Sync + 'static>,
    type_name: &'static str,
}

impl Fault {
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            error: Arc::new(error),
            type_name: std::any::type_name::<E>(),
        }
    }

    /// The wrapped error.
    #[must_use]
    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.error.as_ref()
    }

    /// Fully qualified type name of the wrapped error.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Human-readable error text.
    #[must_use]
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.error, &other.error)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("type_name", &self.type_name)
            .field("message", &self.message())
            .finish()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.error)
    }
}
