//! Topic filter set.
//!
//! The listener's set of topic patterns. The set is an immutable snapshot
//! behind an [`ArcSwap`]: `replace` builds a new set and swaps the pointer,
//! and readers take one snapshot per evaluation without ever blocking.
//! An evaluation that loaded the previous snapshot finishes against it.

use std::collections::BTreeSet;
use std::sync::Arc;

use arc_swap::ArcSwap;

/// A snapshot of the filter set.
pub type TopicSnapshot = Arc<BTreeSet<String>>;

/// Concurrently replaceable set of topic patterns. Empty matches everything.
#[derive(Debug)]
pub struct TopicFilterSet {
    topics: ArcSwap<BTreeSet<String>>,
}

impl TopicFilterSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            topics: ArcSwap::from_pointee(BTreeSet::new()),
        }
    }

    pub fn with_topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Self::new();
        set.replace(topics);
        set
    }

    /// Replace every pattern at once.
    pub fn replace<I, S>(&self, topics: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next: BTreeSet<String> = topics.into_iter().map(Into::into).collect();
        self.topics.store(Arc::new(next));
    }

    /// The current patterns.
    #[must_use]
    pub fn snapshot(&self) -> TopicSnapshot {
        self.topics.load_full()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.load().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.load().len()
    }

    #[must_use]
    pub fn contains(&self, topic: &str) -> bool {
        self.topics.load().contains(topic)
    }
}

impl Default for TopicFilterSet {
    fn default() -> Self {
        Self::new()
    }
}
