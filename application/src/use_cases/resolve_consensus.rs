//! Consensus resolution use case (the "facilitator").
//!
//! Post-processes the final stage's extracted votes into a winner set.
//! Tallying is pure domain logic; a tie triggers one secondary reasoner
//! call whose answer is validated against the candidate set, with a
//! deterministic fallback when the call fails, is unavailable, or names
//! nobody valid. This resolver never fails: it always returns a non-empty
//! winner set for a non-empty candidate set.

use crate::ports::reasoner::Reasoner;
use colloquy_domain::{
    AgentId, ConsensusResult, DecisionMethod, PersonalityProfile, StagePrompt, Vote, tally_votes,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for resolving extracted votes into a consensus
pub struct FacilitateConsensusUseCase {
    reasoner: Option<Arc<dyn Reasoner>>,
}

impl FacilitateConsensusUseCase {
    /// Resolver with the secondary tie-break pass enabled.
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self {
            reasoner: Some(reasoner),
        }
    }

    /// Resolver without a reasoner: ties fall back to the tied set.
    pub fn without_tie_break() -> Self {
        Self { reasoner: None }
    }

    /// Resolve votes against the candidate set.
    pub async fn resolve(
        &self,
        votes: &[Vote],
        candidates: &[PersonalityProfile],
    ) -> ConsensusResult {
        let ids: Vec<AgentId> = candidates.iter().map(|p| p.id.clone()).collect();
        let tally = tally_votes(votes, &ids);

        if !tally.has_votes() {
            // Zero valid votes: deterministic fallback to the first
            // candidate in iteration order.
            info!("no valid votes; falling back to the first candidate");
            let winners: Vec<AgentId> = ids.first().cloned().into_iter().collect();
            return ConsensusResult {
                tally,
                winners,
                method: DecisionMethod::Fallback,
            };
        }

        if !tally.is_tie() {
            let winners = tally.leaders.clone();
            return ConsensusResult {
                tally,
                winners,
                method: DecisionMethod::Tally,
            };
        }

        info!(leaders = tally.leaders.len(), "vote tie; attempting tie-break");

        if let Some(reasoner) = &self.reasoner {
            let excerpts: Vec<(String, String)> = votes
                .iter()
                .filter(|v| v.is_countable(&ids))
                .filter_map(|v| v.reasoning.as_ref().map(|r| (v.voter.to_string(), r.clone())))
                .collect();

            let instruction = StagePrompt::tie_break(&tally.count_lines(), &excerpts);
            match reasoner.execute(&instruction).await {
                Ok(reply) => {
                    let named = parse_winner_names(&reply.content, candidates);
                    if !named.is_empty() {
                        return ConsensusResult {
                            tally,
                            winners: named,
                            method: DecisionMethod::TieBreak,
                        };
                    }
                    debug!("tie-break reply named no valid candidate");
                }
                Err(e) => {
                    warn!("tie-break reasoner failed: {e}");
                }
            }
        }

        // Deterministic fallback: the full tied-winner set from the tally.
        let winners = tally.leaders.clone();
        ConsensusResult {
            tally,
            winners,
            method: DecisionMethod::Fallback,
        }
    }
}

/// Parse a comma-separated winner declaration, validating each name
/// against the candidate set and discarding unknown identities.
fn parse_winner_names(content: &str, candidates: &[PersonalityProfile]) -> Vec<AgentId> {
    let mut winners = Vec::new();
    for token in content.split([',', '\n', '、']) {
        let token = token
            .trim()
            .trim_matches(|c: char| matches!(c, '*' | '`' | '"' | '.' | '。' | ':' | '：'))
            .trim()
            .to_lowercase();
        if token.is_empty() {
            continue;
        }
        if let Some(candidate) = candidates
            .iter()
            .find(|c| c.match_names().iter().any(|n| *n == token))
            && !winners.contains(&candidate.id)
        {
            winners.push(candidate.id.clone());
        }
    }
    winners
}
