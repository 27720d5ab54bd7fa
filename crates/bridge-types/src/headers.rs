//! # Reserved Keys
//!
//! Header and property names with a fixed meaning on the wire. User data
//! under these names is overwritten by the bridge.

/// Message header naming the bus topic an outbound message is published to.
pub const TOPIC: &str = "topic";

/// Event property holding the source message's creation time (ms since epoch).
pub const TIMESTAMP: &str = "timestamp";

/// Event property holding the raw error of a fault message.
pub const EXCEPTION: &str = "exception";

/// Event property holding the type name of a fault message's error.
pub const EXCEPTION_CLASS: &str = "exception-class";

/// Event property holding the display text of a fault message's error.
pub const EXCEPTION_MESSAGE: &str = "exception-message";

/// Event property carrying the complete source message.
pub const EVENT: &str = "event";

/// Every key the mapper may write over copied headers.
pub const RESERVED_PROPERTIES: [&str; 5] =
    [TIMESTAMP, EXCEPTION, EXCEPTION_CLASS, EXCEPTION_MESSAGE, EVENT];

/// Returns true if `key` is written by the mapper.
#[must_use]
pub fn is_reserved_property(key: &str) -> bool {
    RESERVED_PROPERTIES.contains(&key)
}
