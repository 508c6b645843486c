//! Ordered aggregate of matching strategies.

use std::fmt;
use std::sync::Arc;

use crate::component::{dedup_spans, MatchingComponent};

/// A list of strategies evaluated as one matcher.
///
/// * [`matches`](MatchingComponent::matches) is the logical OR of the
///   members, evaluated left to right and short-circuiting.
/// * [`matched_spans`](MatchingComponent::matched_spans) is the union of every
///   member's spans, deduplicated in member order.
///
/// The composite shares its members through `Arc`; it never owns their
/// dictionaries. Mutation takes `&mut self`, so concurrent readers must be
/// serialised against `add`/`delete` by the caller.
#[derive(Clone, Default)]
pub struct CompositeMatcher {
    strategies: Vec<Arc<dyn MatchingComponent>>,
}

impl fmt::Debug for CompositeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeMatcher")
            .field("num_strategies", &self.strategies.len())
            .finish()
    }
}

impl CompositeMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one strategy.
    pub fn add_strategy(&mut self, strategy: Arc<dyn MatchingComponent>) {
        self.strategies.push(strategy);
    }

    /// Append several strategies, preserving their order.
    pub fn add_strategies<I>(&mut self, strategies: I)
    where
        I: IntoIterator<Item = Arc<dyn MatchingComponent>>,
    {
        self.strategies.extend(strategies);
    }

    /// Remove every occurrence of `strategy`, compared by pointer identity.
    ///
    /// Removing a strategy that is not a member is a no-op.
    pub fn delete_strategy(&mut self, strategy: &Arc<dyn MatchingComponent>) {
        self.strategies
            .retain(|member| !std::ptr::addr_eq(Arc::as_ptr(member), Arc::as_ptr(strategy)));
    }

    /// Current members in evaluation order.
    pub fn strategies(&self) -> &[Arc<dyn MatchingComponent>] {
        &self.strategies
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl MatchingComponent for CompositeMatcher {
    fn matches(&self, text: &str) -> bool {
        self.strategies.iter().any(|s| s.matches(text))
    }

    fn matched_spans(&self, text: &str) -> Vec<String> {
        // No short-circuit: later members can contribute new spans.
        dedup_spans(self.strategies.iter().flat_map(|s| s.matched_spans(text)))
    }
}
