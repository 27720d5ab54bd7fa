//! # Event Bridge
//!
//! Bidirectional bridge between point-to-point message channels and a
//! topic-based publish/subscribe event bus.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `GlobMatcher`: Hierarchical topic patterns (`*`, `**`)
//!   - `TopicFilterSet`: Lock-free replaceable pattern set
//!   - `BridgeConfig`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MessageHandler`: Driving port (messages entering the bridge)
//!   - `MessageChannel`: Driven port (messages leaving the bridge)
//!
//! - **Service Layer** (`service/`): Envelope mapping
//!   - `DefaultMessageEventMapper`: Message to event conversion
//!
//! - **Adapters Layer** (`adapters/`): The two directions
//!   - `EventPublishingHandler`: Channel to bus
//!   - `EventInboundListener`: Bus to channel
//!
//! ## Data Flow
//!
//! ```text
//! channel --Message--> EventPublishingHandler --post/send--> EventBus
//!                          (mapper)
//! EventBus --Event--> EventInboundListener --Message--> channel
//!                       (topic filter)
//! ```
//!
//! ## Wiring
//!
//! ```ignore
//! use std::sync::Arc;
//! use bridge_bus::{InMemoryEventBus, SubscriptionFilter};
//! use event_bridge::{BridgeConfig, EventInboundListener, EventPublishingHandler};
//!
//! let config = BridgeConfig::from_env()?;
//! let bus = Arc::new(InMemoryEventBus::new());
//!
//! let publisher = EventPublishingHandler::from_config(&config.publisher, bus.clone())?;
//!
//! let (tx, rx) = tokio::sync::mpsc::channel(1024);
//! let listener = Arc::new(EventInboundListener::from_config(&config.listener, tx));
//! let _subscription = bus.subscribe(SubscriptionFilter::all(), listener.clone());
//! listener.start().await?;
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{EventInboundListener, EventPublishingHandler, PublisherBuilder};
pub use domain::{
    BridgeConfig, DeliveryMode, FanOut, GlobMatcher, ListenerConfig, MatcherKind,
    PublisherConfig, TopicFilterSet, TopicMatcher,
};
pub use error::{BridgeError, ChannelError};
pub use metrics::{ListenerStats, PublisherStats};
pub use ports::{MessageChannel, MessageHandler};
pub use service::{DefaultMessageEventMapper, MessageEventMapper};
