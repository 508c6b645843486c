use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use profanity_filter::StrategySelection;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub strategies: StrategySelection,
    #[serde(default)]
    pub ignore_list: Vec<String>,
    #[serde(default)]
    pub dictionaries: DictionaryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct DictionaryConfig {
    /// Start from the bundled English, Spanish and Portuguese lists.
    #[serde(default = "default_true")]
    pub include_builtin: bool,
    /// Extra exact-match word lists.
    #[serde(default)]
    pub exact: Vec<PathBuf>,
    /// Extra partial-match word lists.
    #[serde(default)]
    pub partial: Vec<PathBuf>,
    /// Replaces the bundled leet table when set.
    #[serde(default)]
    pub leet_table: Option<PathBuf>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            include_builtin: default_true(),
            exact: Vec::new(),
            partial: Vec::new(),
            leet_table: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default-value functions used by serde
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Load configuration from a YAML file.
///
/// If the file does not exist a default configuration is returned and a
/// warning is emitted.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        warn!(
            path = %path.display(),
            "configuration file not found; using defaults"
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

    parse(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))
}

fn parse(yaml: &str) -> Result<Config, serde_yml::Error> {
    serde_yml::from_str(yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use profanity_filter::StrategyName;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load(Path::new("/does/not/exist/profanity.yaml")).unwrap();
        assert_eq!(cfg.strategies, StrategySelection::Basic);
        assert!(cfg.ignore_list.is_empty());
        assert!(cfg.dictionaries.include_builtin);
        assert!(cfg.dictionaries.leet_table.is_none());
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn empty_document_fields_default() {
        let cfg = parse("logging:\n  level: debug\n").unwrap();
        assert_eq!(cfg.strategies, StrategySelection::Basic);
        assert!(cfg.dictionaries.include_builtin);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn full_config() {
        let yaml = r#"
strategies: [leet, partial_match]
ignore_list:
  - "hell(o)?"
dictionaries:
  include_builtin: false
  exact: [words/exact.yaml]
  partial: [words/partial.yaml]
  leet_table: words/leet.yaml
"#;
        let cfg = parse(yaml).unwrap();
        assert_eq!(
            cfg.strategies,
            StrategySelection::Only(vec![StrategyName::Leet, StrategyName::PartialMatch])
        );
        assert_eq!(cfg.ignore_list, vec!["hell(o)?"]);
        assert!(!cfg.dictionaries.include_builtin);
        assert_eq!(cfg.dictionaries.exact, vec![PathBuf::from("words/exact.yaml")]);
        assert_eq!(cfg.dictionaries.partial, vec![PathBuf::from("words/partial.yaml")]);
        assert_eq!(
            cfg.dictionaries.leet_table,
            Some(PathBuf::from("words/leet.yaml"))
        );
    }

    #[test]
    fn preset_selection() {
        let cfg = parse("strategies: all\n").unwrap();
        assert_eq!(cfg.strategies, StrategySelection::All);
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!(parse("strategies: [strict]\n").is_err());
    }
}
