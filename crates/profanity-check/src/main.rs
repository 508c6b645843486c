mod cli;
mod config;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use profanity_filter::loader::{builtin_leet_table, load_leet_table};
use profanity_filter::{Dictionaries, ProfanityFilter, StrategySelection, Verdict};

use crate::cli::Cli;
use crate::config::{Config, DictionaryConfig};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One line of output: the input text alongside its verdict.
#[derive(Debug, Serialize)]
struct Report<'a> {
    text: &'a str,
    #[serde(flatten)]
    verdict: Verdict,
}

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

/// `--all` wins over `--strategy`, which wins over the config file.
fn resolve_selection(cli: &Cli, cfg: &Config) -> StrategySelection {
    if cli.all {
        StrategySelection::All
    } else if !cli.strategies.is_empty() {
        StrategySelection::Only(cli.strategies.clone())
    } else {
        cfg.strategies.clone()
    }
}

fn load_dictionaries(cfg: &DictionaryConfig) -> Result<Dictionaries> {
    let mut dictionaries = if cfg.include_builtin {
        Dictionaries::builtin()?
    } else {
        Dictionaries::default()
    };
    for path in &cfg.exact {
        dictionaries.extend_exact_from(path)?;
    }
    for path in &cfg.partial {
        dictionaries.extend_partial_from(path)?;
    }
    Ok(dictionaries)
}

fn build_filter(cfg: &DictionaryConfig, ignore_list: &[String]) -> Result<ProfanityFilter> {
    let dictionaries = load_dictionaries(cfg).context("failed to load dictionaries")?;
    let leet_table = match &cfg.leet_table {
        Some(path) => load_leet_table(path)?,
        None => builtin_leet_table()?,
    };

    info!(
        exact_words = dictionaries.exact.len(),
        partial_words = dictionaries.partial.len(),
        leet_letters = leet_table.len(),
        "dictionaries loaded"
    );

    ProfanityFilter::new(&dictionaries, Arc::new(leet_table), ignore_list)
        .context("failed to initialize profanity filter")
}

/// Check every input, writing one JSON line per input. Returns whether any
/// input was profane.
fn run<I>(
    filter: &ProfanityFilter,
    selection: &StrategySelection,
    inputs: I,
    out: &mut impl Write,
) -> Result<bool>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut any_profane = false;
    for text in inputs {
        let text = text?;
        let verdict = filter.check(&text, selection);
        any_profane |= verdict.profane;

        let report = Report {
            text: &text,
            verdict,
        };
        serde_json::to_writer(&mut *out, &report).context("failed to serialize report")?;
        writeln!(out).context("failed to write report")?;
    }
    Ok(any_profane)
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    // 1. Parse CLI args.
    let cli = Cli::parse();

    // 2. Load config, then merge CLI overrides.
    let mut cfg = config::load(&cli.config)?;
    cfg.ignore_list.extend(cli.ignore.iter().cloned());
    let selection = resolve_selection(&cli, &cfg);

    // 3. Init tracing-subscriber with JSON format on stderr.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    info!(
        config_file = %cli.config.display(),
        strategies = ?selection.names(),
        ignored = cfg.ignore_list.len(),
        "profanity-check starting"
    );

    // 4. Build the filter.
    let filter = build_filter(&cfg.dictionaries, &cfg.ignore_list)?;

    // 5. Check the positional text, or stdin line by line.
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let any_profane = if cli.text.is_empty() {
        let lines = io::stdin()
            .lock()
            .lines()
            .map(|line| line.context("failed to read stdin"));
        run(&filter, &selection, lines, &mut out)?
    } else {
        run(&filter, &selection, cli.text.iter().cloned().map(Ok), &mut out)?
    };
    out.flush().context("failed to flush stdout")?;

    if cli.fail_on_match && any_profane {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use profanity_filter::StrategyName;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("profanity-check").chain(args.iter().copied()))
    }

    fn temp_yaml(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "profanity-check-{}-{name}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn selection_precedence() {
        let cfg = Config {
            strategies: StrategySelection::Only(vec![StrategyName::Leet]),
            ..Config::default()
        };
        assert_eq!(resolve_selection(&cli(&[]), &cfg), cfg.strategies);
        assert_eq!(
            resolve_selection(&cli(&["-s", "partial_match"]), &cfg),
            StrategySelection::Only(vec![StrategyName::PartialMatch])
        );
        assert_eq!(
            resolve_selection(&cli(&["-s", "partial_match", "--all"]), &cfg),
            StrategySelection::All
        );
    }

    #[test]
    fn writes_one_json_line_per_input() {
        let filter = build_filter(&DictionaryConfig::default(), &[]).unwrap();
        let inputs = ["hello there", "what the fuck"].map(|s| Ok(s.to_string()));
        let mut out = Vec::new();

        let any = run(&filter, &StrategySelection::Basic, inputs, &mut out).unwrap();
        assert!(any);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["text"], "hello there");
        assert_eq!(lines[0]["profane"], false);
        assert_eq!(lines[0]["count"], 0);
        assert_eq!(lines[1]["profane"], true);
        assert_eq!(lines[1]["words"], serde_json::json!(["fuck"]));
    }

    #[test]
    fn clean_inputs_report_no_match() {
        let filter = build_filter(&DictionaryConfig::default(), &["fuck".to_string()]).unwrap();
        let mut out = Vec::new();
        let any = run(
            &filter,
            &StrategySelection::All,
            [Ok("fuck".to_string())],
            &mut out,
        )
        .unwrap();
        assert!(!any);
    }

    #[test]
    fn custom_dictionaries_replace_builtin() {
        let exact = temp_yaml("exact", "- foo\n");
        let leet = temp_yaml("leet", "o: [\"o\", \"0\"]\n");
        let cfg = DictionaryConfig {
            include_builtin: false,
            exact: vec![exact.clone()],
            partial: Vec::new(),
            leet_table: Some(leet.clone()),
        };
        let filter = build_filter(&cfg, &[]).unwrap();
        let leet_only = StrategySelection::Only(vec![StrategyName::Leet]);
        assert!(filter.profane("f00", &leet_only));
        assert!(!filter.profane("fuck", &StrategySelection::All));

        std::fs::remove_file(exact).unwrap();
        std::fs::remove_file(leet).unwrap();
    }

    #[test]
    fn missing_dictionary_file_fails() {
        let cfg = DictionaryConfig {
            exact: vec![PathBuf::from("/does/not/exist.yaml")],
            ..DictionaryConfig::default()
        };
        let err = build_filter(&cfg, &[]).unwrap_err();
        assert!(
            format!("{err:#}").contains("failed to read dictionary file"),
            "unexpected error: {err:#}"
        );
    }
}
