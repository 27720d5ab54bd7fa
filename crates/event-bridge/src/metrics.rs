//! Counter snapshots for the bridge adapters.
//!
//! The adapters keep their own atomic counters; these are the plain values
//! returned by `stats()`.
//!
//! ## Usage
//!
//! ```ignore
//! let stats = publisher.stats();
//! if stats.failure_rate() > 0.01 {
//!     tracing::warn!(?stats, "Publisher failure rate above 1%");
//! }
//! ```

use serde::Serialize;

/// Outbound publisher counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublisherStats {
    /// Events accepted by the bus
    pub published: u64,
    /// Messages with no resolvable topic
    pub mapping_failures: u64,
    /// Dispatches the bus refused or failed
    pub delivery_failures: u64,
}

impl PublisherStats {
    /// Messages handled, successful or not.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.published + self.mapping_failures + self.delivery_failures
    }

    /// Fraction of handled messages that failed (0.0 when none were handled).
    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.mapping_failures + self.delivery_failures) as f64 / total as f64
    }
}

/// Inbound listener counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListenerStats {
    /// Events seen while running
    pub events_received: u64,
    /// Events that matched no pattern
    pub events_filtered: u64,
    /// Messages accepted by the downstream channel
    pub messages_forwarded: u64,
    /// Messages the downstream channel refused
    pub forward_failures: u64,
}
