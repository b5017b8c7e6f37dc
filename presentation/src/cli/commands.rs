//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use orchestra_domain::ConsensusMode;
use std::path::PathBuf;

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for provider-orchestra
#[derive(Parser, Debug)]
#[command(name = "orchestra")]
#[command(author, version, about = "Query, compare and debate across multiple LLM providers")]
#[command(long_about = r#"
Orchestra sends a prompt to one or more registered providers.

Commands:
  query      Ask a single provider
  consensus  Ask every selected provider and report the majority answer
  debate     Run refinement rounds until the providers agree

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./orchestra.toml    Project-level config
3. ~/.config/provider-orchestra/config.toml   Global config

ORCHESTRA_* environment variables override [orchestra] settings.

Example:
  orchestra query "What's a good name for a cache crate?"
  orchestra consensus -p openai -p anthropic "Which database for a ledger?"
  orchestra debate --threshold 0.8 --max-rounds 4 "Tabs or spaces?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Append lifecycle events as JSON lines to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub event_log: Option<PathBuf>,

    /// Write tracing output to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Overall time limit for the operation, in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a single provider
    Query {
        prompt: String,

        /// Provider to ask (defaults to the configured default provider)
        #[arg(short, long, value_name = "NAME")]
        provider: Option<String>,

        #[arg(long)]
        max_tokens: Option<u32>,

        #[arg(long)]
        temperature: Option<f32>,

        /// Print the answer as it arrives
        #[arg(long)]
        stream: bool,
    },

    /// Ask several providers and report the majority answer
    Consensus {
        prompt: String,

        /// Providers to include (can be specified multiple times; default all)
        #[arg(short = 'p', long = "provider", value_name = "NAME")]
        providers: Vec<String>,

        /// Consensus strategy
        #[arg(long, value_name = "MODE")]
        mode: Option<ConsensusMode>,
    },

    /// Run refinement rounds until the providers converge
    Debate {
        prompt: String,

        /// Providers to include (can be specified multiple times; default all)
        #[arg(short = 'p', long = "provider", value_name = "NAME")]
        providers: Vec<String>,

        /// Agreement needed to stop early, between 0 and 1
        #[arg(long)]
        threshold: Option<f64>,

        /// Maximum number of rounds
        #[arg(long)]
        max_rounds: Option<usize>,
    },

    /// Probe every registered provider
    Health,

    /// List registered providers
    Providers,

    /// Show configuration file locations
    ShowConfig,
}

impl Command {
    /// Explicit provider selection, `None` meaning every provider.
    pub fn selected_providers(&self) -> Option<&[String]> {
        let providers = match self {
            Command::Consensus { providers, .. } | Command::Debate { providers, .. } => providers,
            _ => return None,
        };
        (!providers.is_empty()).then_some(providers.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_consensus_with_repeated_providers() {
        let cli = Cli::try_parse_from([
            "orchestra",
            "consensus",
            "-p",
            "openai",
            "--provider",
            "anthropic",
            "--mode",
            "weighted",
            "Which database?",
        ])
        .unwrap();

        match &cli.command {
            Command::Consensus { prompt, mode, .. } => {
                assert_eq!(prompt, "Which database?");
                assert_eq!(*mode, Some(ConsensusMode::Weighted));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(
            cli.command.selected_providers(),
            Some(["openai".to_string(), "anthropic".to_string()].as_slice())
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "orchestra",
            "debate",
            "--threshold",
            "0.8",
            "Tabs or spaces?",
            "-o",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::Debate { threshold: Some(t), max_rounds: None, .. } if (t - 0.8).abs() < f64::EPSILON
        ));
        assert_eq!(cli.command.selected_providers(), None);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["orchestra", "consensus", "--mode", "loudest", "q"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["orchestra"]).is_err());
    }
}
