//! Topic pattern matching.
//!
//! Patterns are hierarchical globs over separator-delimited topics:
//! - `*` as a whole segment matches exactly one segment: `a/*` matches `a/b`
//!   but not `a/b/c`
//! - `**` as a whole segment matches zero or more segments, anywhere in the
//!   pattern: `a/**/z` matches `a/z`, `a/b/z` and `a/b/c/z`
//! - inside a segment, `*` matches any run of characters and `?` exactly one
//!   character; neither crosses the separator: `order-*` matches `order-42`
//!
//! A pattern without wildcards matches only the identical topic.

/// Decides whether a topic matches a pattern.
pub trait TopicMatcher: Send + Sync {
    fn matches(&self, pattern: &str, topic: &str) -> bool;
}

impl<F> TopicMatcher for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn matches(&self, pattern: &str, topic: &str) -> bool {
        self(pattern, topic)
    }
}

/// Default topic separator.
pub const DEFAULT_SEPARATOR: char = '/';

const WILDCARD_MULTI: &str = "**";

/// Hierarchical glob matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobMatcher {
    separator: char,
}

impl GlobMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    #[must_use]
    pub fn with_separator(separator: char) -> Self {
        Self { separator }
    }

    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Check if `pattern` contains any wildcard.
    #[must_use]
    pub fn is_pattern(pattern: &str) -> bool {
        pattern.contains('*') || pattern.contains('?')
    }
}

impl Default for GlobMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicMatcher for GlobMatcher {
    fn matches(&self, pattern: &str, topic: &str) -> bool {
        if !Self::is_pattern(pattern) {
            return pattern == topic;
        }

        let mut pattern_segments: Vec<&str> = pattern.split(self.separator).collect();
        // Adjacent `**` are equivalent to one and only add backtracking.
        pattern_segments.dedup_by(|a, b| *a == WILDCARD_MULTI && *b == WILDCARD_MULTI);
        let topic_segments: Vec<&str> = topic.split(self.separator).collect();

        match_segments(&pattern_segments, &topic_segments)
    }
}

/// Segment-level match, filled from the end of the pattern backwards.
///
/// `suffix[j]` holds whether the pattern segments processed so far match
/// `topic[j..]`, so each segment is compared once per topic position.
fn match_segments(pattern: &[&str], topic: &[&str]) -> bool {
    let n = topic.len();
    let mut suffix = vec![false; n + 1];
    suffix[n] = true;

    for head in pattern.iter().rev() {
        let mut current = vec![false; n + 1];
        if *head == WILDCARD_MULTI {
            let mut reachable = false;
            for j in (0..=n).rev() {
                reachable |= suffix[j];
                current[j] = reachable;
            }
        } else {
            for j in 0..n {
                current[j] = suffix[j + 1] && segment_matches(head, topic[j]);
            }
        }
        suffix = current;
    }

    suffix[0]
}

/// Character-level glob within one segment.
fn segment_matches(pattern: &str, segment: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let s: Vec<char> = segment.chars().collect();

    let (mut pi, mut si) = (0, 0);
    // Position of the last `*` seen and the segment index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while si < s.len() {
        match p.get(pi) {
            Some('*') => {
                backtrack = Some((pi, si));
                pi += 1;
            }
            Some('?') => {
                pi += 1;
                si += 1;
            }
            Some(c) if *c == s[si] => {
                pi += 1;
                si += 1;
            }
            _ => match backtrack {
                Some((star, star_si)) => {
                    pi = star + 1;
                    si = star_si + 1;
                    backtrack = Some((star, star_si + 1));
                }
                None => return false,
            },
        }
    }

    p[pi..].iter().all(|c| *c == '*')
}
