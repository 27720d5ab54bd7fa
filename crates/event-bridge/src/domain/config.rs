//! Bridge configuration and validation.
//!
//! # Example
//!
//! ```ignore
//! use event_bridge::domain::{BridgeConfig, DeliveryMode};
//!
//! let config = BridgeConfig::default()
//!     .with_delivery_mode(DeliveryMode::Sync)
//!     .with_default_topic("orders/events")
//!     .with_topics(["orders/**"]);
//! config.validate()?;
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// How the publisher hands events to the bus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Fire-and-forget `post`.
    #[default]
    Async,
    /// Blocking `send`; returns after every listener ran.
    Sync,
}

impl FromStr for DeliveryMode {
    type Err = BridgeError;

    /// Accepts `async`/`asynchronous`/`asynchronous_delivery`/`1` and
    /// `sync`/`synchronous`/`synchronous_delivery`/`2`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "async" | "asynchronous" | "asynchronous_delivery" | "1" => Ok(Self::Async),
            "sync" | "synchronous" | "synchronous_delivery" | "2" => Ok(Self::Sync),
            _ => Err(BridgeError::InvalidDeliveryMode(s.to_string())),
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Async => write!(f, "async"),
            Self::Sync => write!(f, "sync"),
        }
    }
}

/// How the listener compares event topics with its filter set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// Hierarchical glob patterns (`*`, `**`).
    #[default]
    Glob,
    /// Literal membership only.
    Exact,
}

impl FromStr for MatcherKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "glob" => Ok(Self::Glob),
            "exact" | "none" => Ok(Self::Exact),
            _ => Err(BridgeError::Configuration(format!("unknown topic matcher: {s}"))),
        }
    }
}

/// How many messages one event produces when several patterns match it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FanOut {
    /// One message per matching pattern.
    #[default]
    PerPattern,
    /// At most one message per event.
    Once,
}

impl FromStr for FanOut {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-pattern" | "per_pattern" => Ok(Self::PerPattern),
            "once" => Ok(Self::Once),
            _ => Err(BridgeError::Configuration(format!("unknown fan-out: {s}"))),
        }
    }
}

/// Outbound publisher settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherConfig {
    pub delivery_mode: DeliveryMode,
    /// Topic used when a message carries no `topic` header.
    pub default_topic: Option<String>,
}

/// Inbound listener settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Topic patterns to forward. Empty forwards everything.
    pub topics: Vec<String>,
    pub matcher: MatcherKind,
    pub fan_out: FanOut,
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub publisher: PublisherConfig,
    pub listener: ListenerConfig,
}

impl BridgeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BRIDGE_DELIVERY_MODE`: `async` or `sync` (default: async)
    /// - `BRIDGE_DEFAULT_TOPIC`: fallback publish topic (default: none)
    /// - `BRIDGE_TOPICS`: comma-separated listener patterns (default: none)
    /// - `BRIDGE_TOPIC_MATCHER`: `glob` or `exact` (default: glob)
    /// - `BRIDGE_FAN_OUT`: `per-pattern` or `once` (default: per-pattern)
    pub fn from_env() -> Result<Self, BridgeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BridgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup("BRIDGE_DELIVERY_MODE") {
            config.publisher.delivery_mode = mode.parse()?;
        }

        config.publisher.default_topic = lookup("BRIDGE_DEFAULT_TOPIC")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if let Some(topics) = lookup("BRIDGE_TOPICS") {
            config.listener.topics = topics
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(matcher) = lookup("BRIDGE_TOPIC_MATCHER") {
            config.listener.matcher = matcher.parse()?;
        }

        if let Some(fan_out) = lookup("BRIDGE_FAN_OUT") {
            config.listener.fan_out = fan_out.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot work.
    ///
    /// A missing default topic is allowed: messages may carry their own.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if let Some(topic) = &self.publisher.default_topic {
            if topic.trim().is_empty() {
                return Err(BridgeError::Configuration(
                    "default_topic cannot be blank".to_string(),
                ));
            }
        }

        if self.listener.topics.iter().any(|t| t.trim().is_empty()) {
            return Err(BridgeError::Configuration(
                "listener topics cannot contain blank patterns".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the delivery mode
    pub fn with_delivery_mode(mut self, mode: DeliveryMode) -> Self {
        self.publisher.delivery_mode = mode;
        self
    }

    /// Builder-style method to set the default topic
    pub fn with_default_topic(mut self, topic: impl Into<String>) -> Self {
        self.publisher.default_topic = Some(topic.into());
        self
    }

    /// Builder-style method to set the listener patterns
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.listener.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_matcher(mut self, matcher: MatcherKind) -> Self {
        self.listener.matcher = matcher;
        self
    }

    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.listener.fan_out = fan_out;
        self
    }
}
