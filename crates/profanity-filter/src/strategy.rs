use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a strategy name does not resolve to a [`StrategyName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("strategy name \"{0}\" not supported")]
pub struct UnknownStrategy(pub String);

/// The named detection strategies a [`ProfanityFilter`](crate::ProfanityFilter)
/// builds from its dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    /// Exact words with symbols or separators allowed between letters.
    AllowSymbol,
    /// Exact words whose characters may repeat.
    DuplicateCharacters,
    /// Exact words with leetspeak substitutions.
    Leet,
    /// Partial and exact words matched anywhere in the text.
    PartialMatch,
}

impl StrategyName {
    /// Every strategy, in the order `all` evaluates them.
    pub const ALL: [StrategyName; 4] = [
        Self::AllowSymbol,
        Self::DuplicateCharacters,
        Self::Leet,
        Self::PartialMatch,
    ];

    /// The lenient default set.
    pub const BASIC: [StrategyName; 2] = [Self::AllowSymbol, Self::PartialMatch];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllowSymbol => "allow_symbol",
            Self::DuplicateCharacters => "duplicate_characters",
            Self::Leet => "leet",
            Self::PartialMatch => "partial_match",
        }
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyName {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Which strategies a query runs.
///
/// Deserializes from `basic`, `all`, or a list of strategy names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SelectionRepr", into = "SelectionRepr")]
pub enum StrategySelection {
    /// `allow_symbol` and `partial_match`.
    #[default]
    Basic,
    /// Every strategy.
    All,
    /// Exactly these strategies, in this order.
    Only(Vec<StrategyName>),
}

impl StrategySelection {
    /// The strategies this selection runs, in evaluation order.
    pub fn names(&self) -> &[StrategyName] {
        match self {
            Self::Basic => &StrategyName::BASIC,
            Self::All => &StrategyName::ALL,
            Self::Only(names) => names,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SelectionRepr {
    Preset(Preset),
    List(Vec<StrategyName>),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Preset {
    Basic,
    All,
}

impl From<SelectionRepr> for StrategySelection {
    fn from(repr: SelectionRepr) -> Self {
        match repr {
            SelectionRepr::Preset(Preset::Basic) => Self::Basic,
            SelectionRepr::Preset(Preset::All) => Self::All,
            SelectionRepr::List(names) => Self::Only(names),
        }
    }
}

impl From<StrategySelection> for SelectionRepr {
    fn from(selection: StrategySelection) -> Self {
        match selection {
            StrategySelection::Basic => Self::Preset(Preset::Basic),
            StrategySelection::All => Self::Preset(Preset::All),
            StrategySelection::Only(names) => Self::List(names),
        }
    }
}
