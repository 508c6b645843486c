/// Errors that can occur while building a strategy or a leet table.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to compile dictionary pattern: {0}")]
    RegexCompile(#[from] regex::Error),

    #[error("dictionary entry {index} is empty")]
    EmptyEntry { index: usize },

    #[error("leet table key '{0}' is not a single lowercase character")]
    InvalidLeetKey(String),

    #[error("leet table entry for '{0}' has no alternatives")]
    EmptyLeetAlternatives(char),
}
