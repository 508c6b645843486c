use std::borrow::Cow;
use std::sync::Arc;

use anyhow::{Context, Result};
use profanity_engine::{CompositeMatcher, LeetTable, MatchingComponent, PatternStrategy};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::loader::{builtin_leet_table, Dictionaries};
use crate::moderation::ModerationGateway;
use crate::strategy::{StrategyName, StrategySelection};

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// The outcome of a [`ProfanityFilter::check`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub profane: bool,
    /// Number of distinct matched spans.
    pub count: usize,
    /// Distinct matched spans in order of first occurrence.
    pub words: Vec<String>,
}

// ---------------------------------------------------------------------------
// ProfanityFilter
// ---------------------------------------------------------------------------

/// Named-strategy front end over the matching engine.
///
/// Construct via [`ProfanityFilter::new`], which compiles every named
/// strategy once; each query then assembles a [`CompositeMatcher`] from the
/// selected strategies.
pub struct ProfanityFilter {
    allow_symbol: Arc<dyn MatchingComponent>,
    duplicate_characters: Arc<dyn MatchingComponent>,
    leet: Arc<dyn MatchingComponent>,
    partial_match: Arc<dyn MatchingComponent>,
    /// Case-insensitive patterns blanked out before matching.
    ignore_list: Vec<Regex>,
    moderation: Option<ModerationGateway>,
}

impl std::fmt::Debug for ProfanityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfanityFilter")
            .field("num_ignored", &self.ignore_list.len())
            .field("moderation", &self.moderation)
            .finish()
    }
}

impl ProfanityFilter {
    /// Compile the named strategies from `dictionaries`.
    ///
    /// `leet_table` is shared with the leet strategy. `ignore_list` entries
    /// are regex patterns; an invalid one fails construction.
    pub fn new(
        dictionaries: &Dictionaries,
        leet_table: Arc<LeetTable>,
        ignore_list: &[String],
    ) -> Result<Self> {
        let exact = dictionaries.exact_match();

        let allow_symbol = PatternStrategy::allow_symbols(exact.iter().cloned(), true)
            .context("failed to compile allow_symbol strategy")?;
        let duplicate_characters = PatternStrategy::duplicate_characters(exact.iter().cloned(), true)
            .context("failed to compile duplicate_characters strategy")?;
        let leet = PatternStrategy::leet(exact.iter().cloned(), leet_table, true)
            .context("failed to compile leet strategy")?;
        let partial_match = PatternStrategy::unanchored(dictionaries.partial_match(), true)
            .context("failed to compile partial_match strategy")?;

        let ignore_list = ignore_list
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("invalid ignore pattern: {pattern}"))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            exact_words = exact.len(),
            partial_words = dictionaries.partial.len(),
            ignored = ignore_list.len(),
            "profanity filter compiled"
        );

        Ok(Self {
            allow_symbol: Arc::new(allow_symbol),
            duplicate_characters: Arc::new(duplicate_characters),
            leet: Arc::new(leet),
            partial_match: Arc::new(partial_match),
            ignore_list,
            moderation: None,
        })
    }

    /// A filter over the bundled dictionaries and leet table.
    pub fn builtin(ignore_list: &[String]) -> Result<Self> {
        let dictionaries = Dictionaries::builtin()?;
        let leet_table = Arc::new(builtin_leet_table()?);
        Self::new(&dictionaries, leet_table, ignore_list)
    }

    /// Consult `gateway` in the `*_with_moderation` queries.
    pub fn with_moderation(mut self, gateway: ModerationGateway) -> Self {
        self.moderation = Some(gateway);
        self
    }

    /// The compiled strategy behind `name`.
    pub fn strategy(&self, name: StrategyName) -> &Arc<dyn MatchingComponent> {
        match name {
            StrategyName::AllowSymbol => &self.allow_symbol,
            StrategyName::DuplicateCharacters => &self.duplicate_characters,
            StrategyName::Leet => &self.leet,
            StrategyName::PartialMatch => &self.partial_match,
        }
    }

    /// Assemble the composite for `selection`.
    pub fn composite(&self, selection: &StrategySelection) -> CompositeMatcher {
        let mut composite = CompositeMatcher::new();
        composite.add_strategies(
            selection
                .names()
                .iter()
                .map(|name| Arc::clone(self.strategy(*name))),
        );
        composite
    }

    // -- Queries --------------------------------------------------------------

    /// Whether `phrase` contains profanity under `selection`.
    pub fn profane(&self, phrase: &str, selection: &StrategySelection) -> bool {
        self.check(phrase, selection).profane
    }

    /// Number of distinct profane spans in `phrase`.
    pub fn profanity_count(&self, phrase: &str, selection: &StrategySelection) -> usize {
        self.check(phrase, selection).count
    }

    /// Distinct profane spans in `phrase`, in order of first occurrence.
    pub fn profane_words(&self, phrase: &str, selection: &StrategySelection) -> Vec<String> {
        self.check(phrase, selection).words
    }

    /// Run `selection` over `phrase` and report every distinct span.
    pub fn check(&self, phrase: &str, selection: &StrategySelection) -> Verdict {
        if phrase.is_empty() {
            return Verdict {
                profane: false,
                count: 0,
                words: Vec::new(),
            };
        }

        let cleaned = self.strip_ignored(phrase);
        debug!(strategies = ?selection.names(), "checking phrase");

        let words = self.composite(selection).matched_spans(&cleaned);
        let verdict = Verdict {
            profane: !words.is_empty(),
            count: words.len(),
            words,
        };

        if verdict.profane {
            info!(count = verdict.count, words = ?verdict.words, "profanity detected");
        }
        verdict
    }

    /// Like [`profane`](Self::profane), but also asks the moderation service
    /// when the local strategies find nothing.
    pub async fn profane_with_moderation(
        &self,
        phrase: &str,
        lang: Option<&str>,
        selection: &StrategySelection,
    ) -> bool {
        if phrase.is_empty() {
            return false;
        }
        if self.profane(phrase, selection) {
            return true;
        }
        match &self.moderation {
            Some(gateway) => gateway
                .count(&self.strip_ignored(phrase), lang)
                .await
                .is_some_and(|count| count > 0),
            None => false,
        }
    }

    /// Like [`profanity_count`](Self::profanity_count), but falls back to the
    /// moderation service's count when the local count is zero.
    pub async fn profanity_count_with_moderation(
        &self,
        phrase: &str,
        lang: Option<&str>,
        selection: &StrategySelection,
    ) -> usize {
        if phrase.is_empty() {
            return 0;
        }
        let local = self.profanity_count(phrase, selection);
        if local > 0 {
            return local;
        }
        match &self.moderation {
            Some(gateway) => gateway
                .count(&self.strip_ignored(phrase), lang)
                .await
                .map_or(0, |count| count as usize),
            None => 0,
        }
    }

    // -- Helpers --------------------------------------------------------------

    /// Replace every ignore-list match with a single space.
    fn strip_ignored<'a>(&self, phrase: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(phrase);
        for pattern in &self.ignore_list {
            let replaced = match pattern.replace_all(&text, " ") {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                text = Cow::Owned(replaced);
            }
        }
        text
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
