//! # profanity-engine
//!
//! Deterministic profanity matching over literal word dictionaries.
//!
//! The crate is organised around three layers:
//!
//! 1. **[`component`]** -- the [`MatchingComponent`] contract every matcher
//!    satisfies (`matches`, `matched_spans`, `match_count`).
//! 2. **[`strategy`]** -- [`PatternStrategy`], which compiles a dictionary into
//!    one unioned regex under a [`Tolerance`] policy (exact, duplicate
//!    characters, symbols, leetspeak, unanchored).
//! 3. **[`composite`]** -- [`CompositeMatcher`], which ORs several strategies
//!    and unions their matched spans.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use profanity_engine::{CompositeMatcher, MatchingComponent, PatternStrategy};
//!
//! let symbols = PatternStrategy::allow_symbols(["shit"], true).unwrap();
//! let partial = PatternStrategy::unanchored(["🖕"], true).unwrap();
//!
//! let members: [Arc<dyn MatchingComponent>; 2] = [Arc::new(symbols), Arc::new(partial)];
//! let mut composite = CompositeMatcher::new();
//! composite.add_strategies(members);
//!
//! assert!(composite.matches("s-h-i-t"));
//! assert_eq!(composite.matched_spans("🖕 and s h i t"), vec!["s h i t", "🖕"]);
//! ```

pub mod component;
pub mod composite;
mod error;
pub mod leet;
pub mod pattern;
pub mod strategy;

// Re-export the most commonly used types at the crate root.
pub use component::MatchingComponent;
pub use composite::CompositeMatcher;
pub use error::EngineError;
pub use leet::LeetTable;
pub use strategy::{PatternStrategy, Tolerance};
