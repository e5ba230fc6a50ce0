//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliOutputFormat {
    /// Every round followed by the synthesis
    Full,
    /// Only the synthesized article
    Synthesis,
    /// The JSON transcript
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Full => OutputFormat::Full,
            CliOutputFormat::Synthesis => OutputFormat::Synthesis,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - Multi-agent debates between language models")]
#[command(long_about = r#"
LLM Council seats several language models around one topic and lets them debate.

The debate runs in rounds:
1. Round 1: every agent gives an initial, well-sourced analysis
2. Round 2+: every agent critically reviews everything said so far
3. Synthesis: the first agent writes a long-form article from the transcript

Within a round each agent sees the responses of the agents seated before it.

Configuration files are loaded from (in priority order):
1. Environment       ANTHROPIC_API_KEY, GROQ_API_KEY, OLLAMA_MODEL, MAX_ROUNDS, ...
2. --config <path>   Explicit config file
3. ./council.toml    Project-level config
4. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council "Is Rust a good fit for data engineering?"
  llm-council --rounds 2 -m claude -m gemini "Monoliths vs microservices"
  llm-council -m ollama:llama3.1:8b -m ollama:mistral:7b --quick "Tabs or spaces?"
  llm-council --render debate_20240517_140309.json --output-dir articles
"#)]
pub struct Cli {
    /// The topic to debate (prompted for when omitted)
    pub topic: Option<String>,

    /// Number of debate rounds (default: 3, or council.rounds from config)
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Agents to seat, as `provider` or `provider:model` (repeatable)
    #[arg(short, long = "models", value_name = "SPEC", value_delimiter = ',')]
    pub models: Vec<String>,

    /// Quick mode: a single round, print the synthesis only
    #[arg(long)]
    pub quick: bool,

    /// Don't save results to files
    #[arg(long)]
    pub no_save: bool,

    /// Don't save the Markdown article (JSON only)
    #[arg(long)]
    pub no_markdown: bool,

    /// Output format (default: full, or output.format from config)
    #[arg(short, long, value_enum)]
    pub output: Option<CliOutputFormat>,

    /// Directory results are saved to (default: output.directory from config)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List providers and whether they are usable, then exit
    #[arg(long)]
    pub list_providers: bool,

    /// Re-render a saved debate_*.json transcript as Markdown and exit
    ///
    /// Prints to stdout, or writes debate_<stamp>.md into --output-dir.
    #[arg(long, value_name = "JSON")]
    pub render: Option<PathBuf>,

    /// Write a daily diagnostic log and a JSONL debate transcript to DIR
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
