use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use profanity_engine::LeetTable;

const BUILTIN_EN: &str = include_str!("../dictionaries/en.yaml");
const BUILTIN_ES: &str = include_str!("../dictionaries/es.yaml");
const BUILTIN_PT: &str = include_str!("../dictionaries/pt.yaml");
const BUILTIN_PARTIAL: &str = include_str!("../dictionaries/partial_match.yaml");
const BUILTIN_LEET: &str = include_str!("../dictionaries/leet.yaml");

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

/// Load a word list (a YAML sequence of strings) from disk.
pub fn load_word_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dictionary file: {}", path.display()))?;
    load_word_list_from_str(&contents)
        .with_context(|| format!("failed to parse dictionary file: {}", path.display()))
}

/// Parse and validate a word list from a YAML string.
pub fn load_word_list_from_str(yaml: &str) -> Result<Vec<String>> {
    let words: Vec<String> =
        serde_yml::from_str(yaml).context("YAML deserialization failed")?;

    for (index, word) in words.iter().enumerate() {
        if word.trim().is_empty() {
            bail!("dictionary entry {index} must not be empty");
        }
    }

    Ok(words)
}

// ---------------------------------------------------------------------------
// Leet table
// ---------------------------------------------------------------------------

/// Load a leet substitution table (a YAML mapping of letter to glyph list)
/// from disk.
pub fn load_leet_table(path: impl AsRef<Path>) -> Result<LeetTable> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read leet table: {}", path.display()))?;
    load_leet_table_from_str(&contents)
        .with_context(|| format!("failed to parse leet table: {}", path.display()))
}

/// Parse and validate a leet table from a YAML string.
///
/// Glyphs must be YAML strings; quote digits and symbols (`"1"`, `"@"`).
pub fn load_leet_table_from_str(yaml: &str) -> Result<LeetTable> {
    let raw: BTreeMap<String, Vec<String>> =
        serde_yml::from_str(yaml).context("YAML deserialization failed")?;
    LeetTable::new(raw).context("invalid leet table")
}

/// The leet table bundled with the crate.
pub fn builtin_leet_table() -> Result<LeetTable> {
    load_leet_table_from_str(BUILTIN_LEET).context("bundled leet table is invalid")
}

// ---------------------------------------------------------------------------
// Dictionaries
// ---------------------------------------------------------------------------

/// The two word lists the named strategies are compiled from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionaries {
    /// Words matched on word boundaries (with symbol, duplicate and leet
    /// tolerance).
    pub exact: Vec<String>,
    /// Tokens matched anywhere in the text.
    pub partial: Vec<String>,
}

impl Dictionaries {
    /// English, Spanish and Portuguese exact lists plus the partial-match
    /// list bundled with the crate.
    pub fn builtin() -> Result<Self> {
        let mut exact = Vec::new();
        for (lang, yaml) in [("en", BUILTIN_EN), ("es", BUILTIN_ES), ("pt", BUILTIN_PT)] {
            exact.extend(
                load_word_list_from_str(yaml)
                    .with_context(|| format!("bundled '{lang}' dictionary is invalid"))?,
            );
        }
        let partial = load_word_list_from_str(BUILTIN_PARTIAL)
            .context("bundled partial-match dictionary is invalid")?;
        Ok(Self { exact, partial })
    }

    /// Words for the boundary-delimited strategies.
    pub fn exact_match(&self) -> &[String] {
        &self.exact
    }

    /// Tokens for the unanchored strategy: the partial list followed by
    /// every exact word.
    pub fn partial_match(&self) -> Vec<String> {
        self.partial.iter().chain(&self.exact).cloned().collect()
    }

    /// Append the word list at `path` to the exact list.
    pub fn extend_exact_from(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.exact.extend(load_word_list(path)?);
        Ok(())
    }

    /// Append the word list at `path` to the partial list.
    pub fn extend_partial_from(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.partial.extend(load_word_list(path)?);
        Ok(())
    }
}
