//! # profanity-filter
//!
//! Named-strategy profanity filter built on `profanity-engine`.  This crate
//! loads the bundled (or user-supplied) YAML dictionaries and leet table,
//! compiles the `allow_symbol`, `duplicate_characters`, `leet` and
//! `partial_match` strategies once, and answers queries against a chosen
//! [`StrategySelection`].  An optional remote moderation service can be
//! consulted when the local dictionaries find nothing.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use profanity_filter::{ProfanityFilter, StrategySelection};
//!
//! let filter = ProfanityFilter::builtin(&[]).unwrap();
//! let verdict = filter.check("f.u.c.k this", &StrategySelection::Basic);
//! println!("{:?}", verdict);
//! ```

mod filter;
pub mod loader;
pub mod moderation;
mod strategy;

// Re-export primary public API at crate root.
pub use filter::{ProfanityFilter, Verdict};
pub use loader::Dictionaries;
pub use moderation::{ModerationClient, ModerationGateway};
pub use strategy::{StrategyName, StrategySelection, UnknownStrategy};
