//! The capability contract shared by every matcher.

use std::collections::HashSet;

/// Something that can detect dictionary matches in a piece of text.
///
/// Implementors must be immutable after construction so they can be shared
/// across threads (`Send + Sync`) and evaluated concurrently without locking.
pub trait MatchingComponent: Send + Sync {
    /// Returns `true` when at least one match exists in `text`.
    fn matches(&self, text: &str) -> bool;

    /// Returns every distinct matched span in order of first occurrence.
    ///
    /// Spans are compared by exact string equality, so `"FOO"` and `"foo"`
    /// are reported separately when both occur.
    fn matched_spans(&self, text: &str) -> Vec<String>;

    /// Number of distinct matched spans (not total occurrences).
    fn match_count(&self, text: &str) -> usize {
        self.matched_spans(text).len()
    }
}

/// Collect `spans` into a vector, dropping repeats while keeping first-seen
/// order.
pub(crate) fn dedup_spans<I>(spans: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for span in spans {
        if seen.insert(span.clone()) {
            out.push(span);
        }
    }
    out
}
