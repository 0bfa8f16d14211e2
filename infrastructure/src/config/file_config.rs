//! File-backed configuration schema.
//!
//! Mirrors the layout of `colloquy.toml`. Every field has a default so a
//! missing file (or a partial one) always yields a usable configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration file schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub reasoner: ReasonerConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Which built-in personas participate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Persona ids to include; empty means the full built-in roster.
    #[serde(default)]
    pub personas: Vec<String>,
}

/// Reasoner backend selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonerConfig {
    /// Completion endpoint URL; absent means the offline scripted reasoner.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}

/// Pipeline behavior toggles and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Run the summary compaction passes between stages.
    #[serde(default = "default_true")]
    pub enable_summaries: bool,
    /// Attempt the secondary reasoner pass on vote ties.
    #[serde(default = "default_true")]
    pub enable_tie_break: bool,
    /// Directory for session snapshots; absent disables persistence.
    #[serde(default)]
    pub snapshot_dir: Option<String>,
    /// Path for the JSONL interaction audit log; absent disables it.
    #[serde(default)]
    pub interaction_log: Option<String>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            enable_summaries: true,
            enable_tie_break: true,
            snapshot_dir: None,
            interaction_log: None,
        }
    }
}

fn default_true() -> bool {
    true
}
