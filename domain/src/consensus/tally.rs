//! Vote tallying for dialogue consensus.
//!
//! Pure counting logic: invalid votes (missing target, self-vote, unknown
//! voter or target) are discarded before counting, never raised as errors.

use crate::persona::profile::AgentId;
use serde::{Deserialize, Serialize};

/// An explicit vote declaration extracted from an agent's final output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    /// Who cast the vote
    pub voter: AgentId,
    /// Who the vote names; `None` when no declaration was detected
    pub voted_for: Option<AgentId>,
    /// Reasoning excerpt trailing the declaration, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Vote {
    pub fn declared(voter: impl Into<AgentId>, voted_for: impl Into<AgentId>) -> Self {
        Self {
            voter: voter.into(),
            voted_for: Some(voted_for.into()),
            reasoning: None,
        }
    }

    /// A vote record for an agent whose output contained no detectable
    /// declaration.
    pub fn undetected(voter: impl Into<AgentId>) -> Self {
        Self {
            voter: voter.into(),
            voted_for: None,
            reasoning: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// A vote counts only when it names a member other than its voter and
    /// both identities belong to the candidate set.
    pub fn is_countable(&self, candidates: &[AgentId]) -> bool {
        match &self.voted_for {
            None => false,
            Some(target) => {
                target != &self.voter
                    && candidates.contains(&self.voter)
                    && candidates.contains(target)
            }
        }
    }
}

/// Per-candidate vote counts with the leading set identified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Counts in candidate iteration order (zero entries included)
    pub counts: Vec<(AgentId, usize)>,
    /// The maximal count across candidates
    pub max_count: usize,
    /// Candidates achieving the maximal count; empty when no valid votes
    pub leaders: Vec<AgentId>,
}

impl VoteTally {
    pub fn has_votes(&self) -> bool {
        self.max_count > 0
    }

    pub fn is_tie(&self) -> bool {
        self.leaders.len() > 1
    }

    /// Render "name: n" lines for prompts and display.
    pub fn count_lines(&self) -> Vec<String> {
        self.counts
            .iter()
            .map(|(id, n)| format!("{id}: {n}"))
            .collect()
    }
}

/// How the final winner set was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionMethod {
    /// A unique leader emerged from the raw tally
    Tally,
    /// A tie was resolved by the secondary reasoning pass
    TieBreak,
    /// Deterministic fallback (unresolved tie, or no valid votes at all)
    Fallback,
}

/// Final consensus outcome: tally plus the resolved winner set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub tally: VoteTally,
    /// Non-empty for any non-empty candidate set
    pub winners: Vec<AgentId>,
    pub method: DecisionMethod,
}

/// Tally votes against a candidate set.
///
/// Discards votes that are missing a target, self-directed, or reference
/// identities outside the candidate set.
pub fn tally_votes(votes: &[Vote], candidates: &[AgentId]) -> VoteTally {
    let mut counts: Vec<(AgentId, usize)> =
        candidates.iter().map(|id| (id.clone(), 0)).collect();

    for vote in votes.iter().filter(|v| v.is_countable(candidates)) {
        if let Some(target) = &vote.voted_for
            && let Some(entry) = counts.iter_mut().find(|(id, _)| id == target)
        {
            entry.1 += 1;
        }
    }

    let max_count = counts.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let leaders = if max_count == 0 {
        Vec::new()
    } else {
        counts
            .iter()
            .filter(|(_, n)| *n == max_count)
            .map(|(id, _)| id.clone())
            .collect()
    };

    VoteTally {
        counts,
        max_count,
        leaders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<AgentId> {
        names.iter().map(|n| AgentId::new(*n)).collect()
    }

    #[test]
    fn test_majority_winner() {
        let candidates = ids(&["x", "y", "a", "b", "c"]);
        let votes = vec![
            Vote::declared("a", "x"),
            Vote::declared("b", "x"),
            Vote::declared("c", "y"),
        ];
        let tally = tally_votes(&votes, &candidates);

        assert_eq!(tally.max_count, 2);
        assert_eq!(tally.leaders, ids(&["x"]));
        assert!(!tally.is_tie());
    }

    #[test]
    fn test_tie_detected() {
        let candidates = ids(&["x", "y", "a", "b"]);
        let votes = vec![Vote::declared("a", "x"), Vote::declared("b", "y")];
        let tally = tally_votes(&votes, &candidates);

        assert_eq!(tally.max_count, 1);
        assert_eq!(tally.leaders, ids(&["x", "y"]));
        assert!(tally.is_tie());
    }

    #[test]
    fn test_self_votes_never_count() {
        let candidates = ids(&["a", "b"]);
        let votes = vec![Vote::declared("a", "a"), Vote::declared("b", "a")];
        let tally = tally_votes(&votes, &candidates);

        assert_eq!(tally.counts[0].1, 1);
        assert_eq!(tally.max_count, 1);
    }

    #[test]
    fn test_undetected_and_unknown_votes_discarded() {
        let candidates = ids(&["a", "b"]);
        let votes = vec![
            Vote::undetected("a"),
            Vote::declared("b", "stranger"),
            Vote::declared("stranger", "a"),
        ];
        let tally = tally_votes(&votes, &candidates);

        assert!(!tally.has_votes());
        assert!(tally.leaders.is_empty());
    }

    #[test]
    fn test_count_lines_render() {
        let candidates = ids(&["a", "b"]);
        let votes = vec![Vote::declared("b", "a")];
        let tally = tally_votes(&votes, &candidates);
        assert_eq!(tally.count_lines(), vec!["a: 1", "b: 0"]);
    }
}
