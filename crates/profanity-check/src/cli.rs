use clap::Parser;
use std::path::PathBuf;

use profanity_filter::StrategyName;

#[derive(Parser, Debug)]
#[command(name = "profanity-check", version, about = "Check text for profanity")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "profanity.yaml")]
    pub config: PathBuf,

    /// Strategy to run; repeat to run several (overrides config file setting)
    #[arg(short, long = "strategy", value_name = "NAME")]
    pub strategies: Vec<StrategyName>,

    /// Run every strategy (overrides --strategy and the config file)
    #[arg(long)]
    pub all: bool,

    /// Regex pattern to blank out before matching; repeatable
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Exit with status 1 if any input is profane
    #[arg(long)]
    pub fail_on_match: bool,

    /// Text to check. Reads lines from stdin when omitted.
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,
}
