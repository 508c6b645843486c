//! Dictionary strategies: a word list compiled into one regex under a
//! tolerance policy.

use std::fmt;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::component::{dedup_spans, MatchingComponent};
use crate::error::EngineError;
use crate::leet::LeetTable;
use crate::pattern;

/// Upper bound on the compiled size of one strategy's regex.
///
/// Symbol-tolerant patterns embed a Unicode class between every pair of
/// letters, which outgrows the `regex` crate's 10 MiB default on large
/// dictionaries.
pub const PATTERN_SIZE_LIMIT: usize = 64 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

/// How far the input may deviate from a dictionary entry and still match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tolerance {
    /// Literal word between boundaries.
    Exact,
    /// Each character may be repeated (`shhhhit`).
    DuplicateCharacters,
    /// Marks, separators, symbols and punctuation may appear between letters
    /// (`s.h-i t`).
    Symbols,
    /// Letters may be replaced by glyphs from the shared table (`sh1t`).
    Leet(Arc<LeetTable>),
    /// Literal substring anywhere in the text, no boundaries.
    Unanchored,
}

impl Tolerance {
    /// Whether matches must start and end on a word boundary.
    pub fn is_anchored(&self) -> bool {
        !matches!(self, Self::Unanchored)
    }

    fn word_pattern(&self, word: &str) -> String {
        match self {
            Self::Exact | Self::Unanchored => pattern::exact_word(word),
            Self::DuplicateCharacters => pattern::duplicate_characters_word(word),
            Self::Symbols => pattern::symbols_word(word),
            Self::Leet(table) => pattern::leet_word(word, table),
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::DuplicateCharacters => write!(f, "duplicate_characters"),
            Self::Symbols => write!(f, "symbols"),
            Self::Leet(_) => write!(f, "leet"),
            Self::Unanchored => write!(f, "unanchored"),
        }
    }
}

// ---------------------------------------------------------------------------
// PatternStrategy
// ---------------------------------------------------------------------------

/// A dictionary compiled into a single unioned regex.
///
/// Construct via [`PatternStrategy::new`] or one of the per-tolerance
/// shorthands. The strategy is immutable afterwards and can be shared freely
/// across threads.
pub struct PatternStrategy {
    tolerance: Tolerance,
    dictionary: Vec<String>,
    ignore_case: bool,
    /// `None` for an empty dictionary: the strategy never matches.
    regex: Option<Regex>,
}

impl fmt::Debug for PatternStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternStrategy")
            .field("tolerance", &self.tolerance.to_string())
            .field("num_words", &self.dictionary.len())
            .field("ignore_case", &self.ignore_case)
            .finish()
    }
}

impl PatternStrategy {
    /// Compile `dictionary` under `tolerance`.
    ///
    /// An empty dictionary yields a strategy that never matches. An empty
    /// entry is rejected, since it would match at every boundary.
    pub fn new<I, S>(tolerance: Tolerance, dictionary: I, ignore_case: bool) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dictionary: Vec<String> = dictionary.into_iter().map(Into::into).collect();

        if let Some(index) = dictionary.iter().position(|w| w.is_empty()) {
            return Err(EngineError::EmptyEntry { index });
        }

        let regex = if dictionary.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = dictionary
                .iter()
                .map(|word| tolerance.word_pattern(word))
                .collect();
            let source = pattern::union(&alternatives, tolerance.is_anchored(), ignore_case);
            Some(
                RegexBuilder::new(&source)
                    .size_limit(PATTERN_SIZE_LIMIT)
                    .dfa_size_limit(PATTERN_SIZE_LIMIT)
                    .build()?,
            )
        };

        debug!(
            tolerance = %tolerance,
            words = dictionary.len(),
            ignore_case,
            "compiled dictionary pattern"
        );

        Ok(Self {
            tolerance,
            dictionary,
            ignore_case,
            regex,
        })
    }

    /// Whole words only, no tolerance.
    pub fn exact<I, S>(dictionary: I, ignore_case: bool) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Tolerance::Exact, dictionary, ignore_case)
    }

    /// Whole words whose characters may each repeat.
    pub fn duplicate_characters<I, S>(dictionary: I, ignore_case: bool) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Tolerance::DuplicateCharacters, dictionary, ignore_case)
    }

    /// Whole words with symbols or separators allowed between letters.
    pub fn allow_symbols<I, S>(dictionary: I, ignore_case: bool) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Tolerance::Symbols, dictionary, ignore_case)
    }

    /// Whole words with leetspeak substitutions from `table`.
    pub fn leet<I, S>(dictionary: I, table: Arc<LeetTable>, ignore_case: bool) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Tolerance::Leet(table), dictionary, ignore_case)
    }

    /// Literal substrings anywhere in the text.
    pub fn unanchored<I, S>(dictionary: I, ignore_case: bool) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Tolerance::Unanchored, dictionary, ignore_case)
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    pub fn dictionary(&self) -> &[String] {
        &self.dictionary
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// The compiled regex source, or `None` for an empty dictionary.
    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }
}

impl MatchingComponent for PatternStrategy {
    fn matches(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }

    fn matched_spans(&self, text: &str) -> Vec<String> {
        let Some(re) = &self.regex else {
            return Vec::new();
        };
        // Group 1 is the word without its delimiters. Resuming the search at
        // the end of the word, not the match, lets a trailing `_` lead the
        // next word (`foo_bar`).
        let mut spans = Vec::new();
        let mut at = 0;
        while let Some(word) = re.captures_at(text, at).and_then(|caps| caps.get(1)) {
            spans.push(word.as_str().to_string());
            at = word.end();
        }
        dedup_spans(spans)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
