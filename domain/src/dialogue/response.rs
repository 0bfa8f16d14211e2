//! Structured per-agent stage outputs

use crate::consensus::tally::Vote;
use crate::dialogue::stage::Stage;
use crate::persona::profile::AgentId;
use serde::{Deserialize, Serialize};

/// One agent's structured judgment of one peer's prior output
///
/// Derived during the mutual-reflection stage; never persisted apart from
/// its parent [`StageResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionRecord {
    /// The peer this reflection is about
    pub target: AgentId,
    /// Representative reaction line, or an explicit no-engagement note
    pub reaction: String,
    pub agreement: bool,
    /// Questions directed at the peer (at most 3)
    #[serde(default)]
    pub questions: Vec<String>,
}

impl ReflectionRecord {
    pub fn engaged(
        target: AgentId,
        reaction: impl Into<String>,
        agreement: bool,
        questions: Vec<String>,
    ) -> Self {
        Self {
            target,
            reaction: reaction.into(),
            agreement,
            questions,
        }
    }

    /// Record for a peer the text never mentions.
    pub fn no_engagement(target: AgentId, reaction: impl Into<String>) -> Self {
        Self {
            target,
            reaction: reaction.into(),
            agreement: false,
            questions: Vec::new(),
        }
    }
}

/// Per-agent, per-stage structured output
///
/// Exactly one exists per (session, stage, agent) triple. `success` and
/// `duration_ms` record the underlying reasoner invocation for audit; a
/// failed invocation still yields a structurally valid response carrying
/// fallback content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResponse {
    pub agent: AgentId,
    pub stage: Stage,
    pub content: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub assumptions: String,
    #[serde(default)]
    pub approach: String,
    /// Sources or prior contributions the response leans on, if the
    /// persona declares any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    pub confidence: f64,
    /// Present only for mutual-reflection responses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reflections: Vec<ReflectionRecord>,
    /// Present only for output-generation responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<Vote>,
    pub success: bool,
    pub duration_ms: u64,
}

impl StageResponse {
    pub fn new(agent: AgentId, stage: Stage, content: impl Into<String>) -> Self {
        Self {
            agent,
            stage,
            content: content.into(),
            reasoning: String::new(),
            assumptions: String::new(),
            approach: String::new(),
            references: Vec::new(),
            confidence: 0.0,
            reflections: Vec::new(),
            vote: None,
            success: true,
            duration_ms: 0,
        }
    }

    pub fn with_derivations(
        mut self,
        reasoning: impl Into<String>,
        assumptions: impl Into<String>,
        approach: impl Into<String>,
    ) -> Self {
        self.reasoning = reasoning.into();
        self.assumptions = assumptions.into();
        self.approach = approach.into();
        self
    }

    pub fn with_references(mut self, references: Vec<String>) -> Self {
        self.references = references;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_reflections(mut self, reflections: Vec<ReflectionRecord>) -> Self {
        self.reflections = reflections;
        self
    }

    pub fn with_vote(mut self, vote: Vote) -> Self {
        self.vote = Some(vote);
        self
    }

    pub fn with_outcome(mut self, success: bool, duration_ms: u64) -> Self {
        self.success = success;
        self.duration_ms = duration_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_builder() {
        let response = StageResponse::new(
            AgentId::new("sage"),
            Stage::IndividualThought,
            "The premise holds.",
        )
        .with_derivations("deduction", "the query is well-posed", "stepwise")
        .with_confidence(0.72)
        .with_outcome(true, 120);

        assert_eq!(response.agent.as_str(), "sage");
        assert!(response.success);
        assert_eq!(response.duration_ms, 120);
        assert!(response.reflections.is_empty());
        assert!(response.vote.is_none());
    }

    #[test]
    fn test_no_engagement_record() {
        let record =
            ReflectionRecord::no_engagement(AgentId::new("muse"), "did not engage");
        assert!(!record.agreement);
        assert!(record.questions.is_empty());
    }
}
