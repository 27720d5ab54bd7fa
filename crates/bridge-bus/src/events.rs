//! # Subscription Filters
//!
//! Bus-side topic interest. This is the bus's own matching, applied before a
//! handler ever sees an event; handlers may filter further.

use crate::{TOPIC_SEPARATOR, WILDCARD_ALL};

/// Topics a handler is registered for.
///
/// Each entry is one of:
/// - `*` - every topic
/// - `a/b/*` - every topic below `a/b`
/// - anything else - that exact topic
///
/// An empty filter accepts every topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    /// Topic patterns. Empty means all topics.
    pub topics: Vec<String>,
}

impl SubscriptionFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topic patterns.
    pub fn topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a topic matches this filter.
    #[must_use]
    pub fn matches(&self, topic: &str) -> bool {
        self.topics.is_empty() || self.topics.iter().any(|p| pattern_matches(p, topic))
    }
}

fn pattern_matches(pattern: &str, topic: &str) -> bool {
    if pattern == WILDCARD_ALL {
        return true;
    }

    let Some(prefix) = pattern
        .strip_suffix(WILDCARD_ALL)
        .and_then(|p| p.strip_suffix(TOPIC_SEPARATOR))
    else {
        return pattern == topic;
    };

    topic
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with(TOPIC_SEPARATOR))
}
