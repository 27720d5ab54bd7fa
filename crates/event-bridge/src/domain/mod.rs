//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Topic pattern matching
//! - The listener's topic filter set
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod config;
pub mod filter;
pub mod matcher;

pub use config::{BridgeConfig, DeliveryMode, FanOut, ListenerConfig, MatcherKind, PublisherConfig};
pub use filter::{TopicFilterSet, TopicSnapshot};
pub use matcher::{GlobMatcher, TopicMatcher, DEFAULT_SEPARATOR};
