//! Complete dialogue result handed to the presentation layer

use crate::consensus::tally::ConsensusResult;
use crate::dialogue::session::DialogueSession;
use crate::persona::profile::AgentId;
use serde::{Deserialize, Serialize};

/// Everything produced by one dialogue cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueOutcome {
    /// The original query
    pub query: String,
    /// Participants in roster order
    pub participants: Vec<AgentId>,
    /// The elected winner set (non-empty)
    pub winners: Vec<AgentId>,
    /// Tally and decision method behind the winner set
    pub consensus: ConsensusResult,
    /// The first winner's final output
    pub conclusion: String,
    /// The full session, including transcript and per-stage history
    pub session: DialogueSession,
}

impl DialogueOutcome {
    /// Display name lookup against the session roster, falling back to the
    /// raw identity for unknown ids.
    pub fn display_name(&self, id: &AgentId) -> String {
        self.session
            .participants()
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.display_name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
