//! Leetspeak substitution table.
//!
//! Maps a lowercase letter to the literal glyphs that may stand in for it
//! (e.g. `i -> ["i", "1", "!", "l"]`). The table is built once by the caller
//! and shared read-only via `Arc` across every leet strategy.

use std::collections::BTreeMap;

use crate::error::EngineError;

/// Immutable letter → glyph-alternatives mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeetTable {
    entries: BTreeMap<char, Vec<String>>,
}

impl LeetTable {
    /// Build a table from `(letter, glyphs)` pairs.
    ///
    /// Each key must be exactly one non-uppercase character and each entry
    /// must keep at least one non-empty glyph. Duplicate glyphs within an
    /// entry are collapsed; a repeated key extends the earlier entry.
    pub fn new<I, K, V, G>(entries: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = G>,
        G: Into<String>,
    {
        let mut table: BTreeMap<char, Vec<String>> = BTreeMap::new();

        for (key, glyphs) in entries {
            let letter = parse_key(key.as_ref())?;
            let slot = table.entry(letter).or_default();
            for glyph in glyphs {
                let glyph = glyph.into();
                if !glyph.is_empty() && !slot.contains(&glyph) {
                    slot.push(glyph);
                }
            }
            if slot.is_empty() {
                return Err(EngineError::EmptyLeetAlternatives(letter));
            }
        }

        Ok(Self { entries: table })
    }

    /// Glyphs registered for `letter`, if any. `letter` must already be
    /// lowercase.
    pub fn alternatives(&self, letter: char) -> Option<&[String]> {
        self.entries.get(&letter).map(Vec::as_slice)
    }

    /// Letters that have substitutions, in ascending order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_key(key: &str) -> Result<char, EngineError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_uppercase() => Ok(c),
        _ => Err(EngineError::InvalidLeetKey(key.to_string())),
    }
}
