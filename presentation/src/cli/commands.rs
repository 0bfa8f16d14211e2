//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for dialogue results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every stage
    Full,
    /// Only the elected conclusion
    Conclusion,
    /// JSON output
    Json,
}

/// CLI arguments for colloquy
#[derive(Parser, Debug)]
#[command(name = "colloquy")]
#[command(author, version, about = "Staged dialogue - personality agents discuss and vote on the best answer")]
#[command(long_about = r#"
Colloquy runs a panel of personality-bound agents through a fixed dialogue:

1. Individual Thought: every agent answers the query independently
2. Mutual Reflection: each agent reacts to every peer by name
3. Conflict Resolution: the open disagreements are argued out
4. Synthesis Attempt: each agent proposes one complete answer
5. Output Generation: final answers plus an explicit "Vote: <name>" line
6. Finalize: votes are tallied; ties go to a secondary reasoning pass

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./colloquy.toml     Project-level config
3. ~/.config/colloquy/config.toml   Global config

Example:
  colloquy "What's the best way to handle errors in Rust?"
  colloquy -p sage -p critic -p muse "Compare async/await patterns"
  colloquy --offline "Dry-run the pipeline without a backend"
"#)]
pub struct Cli {
    /// The query to put to the panel
    pub query: Option<String>,

    /// Personas to include (can be specified multiple times)
    #[arg(short, long, value_name = "PERSONA")]
    pub persona: Vec<String>,

    /// Completion endpoint URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Use the offline scripted reasoner instead of a backend
    #[arg(long)]
    pub offline: bool,

    /// Skip the summary compaction passes
    #[arg(long)]
    pub no_summaries: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "conclusion")]
    pub output: OutputFormat,

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
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
