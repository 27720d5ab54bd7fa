//! # Bus Event
//!
//! A topic-addressed, read-only property bag delivered over the bus.

use std::collections::HashMap;

use crate::errors::EventError;
use crate::value::Value;

/// Property map of an [`Event`].
pub type Properties = HashMap<String, Value>;

/// An immutable bus event.
///
/// The topic is hierarchical (`a/b/c`) and never blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    topic: String,
    properties: Properties,
}

impl Event {
    /// Create an event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::TopicRequired`] if `topic` is empty or whitespace.
    pub fn new(topic: impl Into<String>, properties: Properties) -> Result<Self, EventError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(EventError::TopicRequired);
        }
        Ok(Self { topic, properties })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Look up a property by key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// All property keys, in no particular order.
    #[must_use]
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn contains_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}
