//! Dialogue execution parameters.
//!
//! [`DialogueParams`] groups the static knobs that control one pipeline
//! run. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Pipeline run control parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DialogueParams {
    /// Run the optional summary compaction passes between stages.
    pub enable_summaries: bool,
    /// Attempt the secondary reasoner pass on vote ties.
    pub enable_tie_break: bool,
    /// Persist a whole-session snapshot after every completed stage.
    pub snapshot_each_stage: bool,
}

impl Default for DialogueParams {
    fn default() -> Self {
        Self {
            enable_summaries: true,
            enable_tie_break: true,
            snapshot_each_stage: true,
        }
    }
}

impl DialogueParams {
    pub fn without_summaries(mut self) -> Self {
        self.enable_summaries = false;
        self
    }

    pub fn without_tie_break(mut self) -> Self {
        self.enable_tie_break = false;
        self
    }

    pub fn without_snapshots(mut self) -> Self {
        self.snapshot_each_stage = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let params = DialogueParams::default();
        assert!(params.enable_summaries);
        assert!(params.enable_tie_break);
        assert!(params.snapshot_each_stage);
    }

    #[test]
    fn test_builders() {
        let params = DialogueParams::default()
            .without_summaries()
            .without_tie_break();
        assert!(!params.enable_summaries);
        assert!(!params.enable_tie_break);
        assert!(params.snapshot_each_stage);
    }
}
