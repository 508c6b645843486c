//! Per-word regex fragment builders, one per tolerance policy, plus the
//! boundary delimiter shared by every anchored strategy.
//!
//! Every builder escapes dictionary characters with [`regex::escape`], so a
//! dictionary entry is always treated literally.

use crate::leet::LeetTable;

/// Word boundary used on both sides of an anchored match.
///
/// `\b` treats `_` as a word character, so the explicit `_` alternative is
/// what lets `shit` stand alone inside `FUCK_THIS_SHIT`. Compiled in
/// multi-line mode, so `^`/`$` also match at line breaks.
pub const DELIMITER: &str = r"(?:\b|^|$|_)";

/// Zero or more mark, separator, symbol or punctuation characters.
pub const SYMBOL_RUN: &str = r"[\p{M}\p{Z}\p{S}\p{P}]*";

fn escape_char(c: char) -> String {
    let mut buf = [0u8; 4];
    regex::escape(c.encode_utf8(&mut buf))
}

/// The word itself, escaped.
pub fn exact_word(word: &str) -> String {
    regex::escape(word)
}

/// Every character may repeat: `foo` becomes `f+o+o+`.
pub fn duplicate_characters_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len() * 2);
    for c in word.chars() {
        out.push_str(&escape_char(c));
        out.push('+');
    }
    out
}

/// Symbols may be interspersed between letters: `bar` becomes
/// `b[..]*a[..]*r`.
pub fn symbols_word(word: &str) -> String {
    word.chars()
        .map(escape_char)
        .collect::<Vec<_>>()
        .join(SYMBOL_RUN)
}

/// Each letter with table entries becomes an alternation of its glyphs;
/// anything else stays literal.
pub fn leet_word(word: &str, table: &LeetTable) -> String {
    let mut out = String::with_capacity(word.len() * 8);
    for c in word.chars() {
        match single_lowercase(c).and_then(|lower| table.alternatives(lower)) {
            Some(glyphs) => {
                out.push_str("(?:");
                let escaped: Vec<String> = glyphs.iter().map(|g| regex::escape(g)).collect();
                out.push_str(&escaped.join("|"));
                out.push(')');
            }
            None => out.push_str(&escape_char(c)),
        }
    }
    out
}

/// Lowercase `c` when it maps to exactly one character (the table is keyed
/// by single chars).
fn single_lowercase(c: char) -> Option<char> {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => Some(l),
        _ => None,
    }
}

/// Union `alternatives` into one pattern string with a single capture group
/// around the matched word, optionally wrapped in [`DELIMITER`]s.
pub fn union(alternatives: &[String], anchored: bool, ignore_case: bool) -> String {
    let flags = if ignore_case { "(?mi)" } else { "(?m)" };
    let body = alternatives.join("|");
    if anchored {
        format!("{flags}{DELIMITER}({body}){DELIMITER}")
    } else {
        format!("{flags}({body})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_escapes_metacharacters() {
        assert_eq!(exact_word("a.b"), r"a\.b");
        assert_eq!(exact_word("$hit"), r"\$hit");
    }

    #[test]
    fn duplicate_repeats_each_char() {
        assert_eq!(duplicate_characters_word("foo"), "f+o+o+");
        assert_eq!(duplicate_characters_word("a*"), r"a+\*+");
    }

    #[test]
    fn symbols_join_between_letters_only() {
        let p = symbols_word("bar");
        assert_eq!(p, format!("b{SYMBOL_RUN}a{SYMBOL_RUN}r"));
        assert_eq!(symbols_word("x"), "x");
    }

    #[test]
    fn leet_substitutes_known_letters() {
        let table = LeetTable::new([("i", vec!["1", "!"])]).unwrap();
        assert_eq!(leet_word("sit", &table), "s(?:1|!)t");
        // Lookup is case-insensitive, literal fallback keeps the original.
        assert_eq!(leet_word("SIT", &table), "S(?:1|!)T");
    }

    #[test]
    fn leet_escapes_glyphs() {
        let table = LeetTable::new([("h", vec!["|-|", "#"])]).unwrap();
        assert_eq!(leet_word("h", &table), r"(?:\|\-\||\#)");
    }

    #[test]
    fn union_wraps_in_delimiters() {
        let words = vec!["foo".to_string(), "bar".to_string()];
        assert_eq!(
            union(&words, true, false),
            format!("(?m){DELIMITER}(foo|bar){DELIMITER}")
        );
        assert_eq!(union(&words, false, true), "(?mi)(foo|bar)");
    }
}
