//! Dialogue stage enumeration
//!
//! The stage sequence is fixed. Agent stages require one response per
//! participant before the pipeline may advance; summary stages are optional
//! compaction passes that condense the preceding stage's responses into a
//! single record; Finalize is the facilitator's consensus pass.

use serde::{Deserialize, Serialize};

/// One phase of the fixed dialogue sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    IndividualThought,
    MutualReflection,
    ReflectionSummary,
    ConflictResolution,
    ResolutionSummary,
    SynthesisAttempt,
    SynthesisSummary,
    OutputGeneration,
    Finalize,
}

impl Stage {
    /// The fixed stage order a session advances through.
    pub const SEQUENCE: [Stage; 9] = [
        Stage::IndividualThought,
        Stage::MutualReflection,
        Stage::ReflectionSummary,
        Stage::ConflictResolution,
        Stage::ResolutionSummary,
        Stage::SynthesisAttempt,
        Stage::SynthesisSummary,
        Stage::OutputGeneration,
        Stage::Finalize,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Stage::IndividualThought => "individual-thought",
            Stage::MutualReflection => "mutual-reflection",
            Stage::ReflectionSummary => "reflection-summary",
            Stage::ConflictResolution => "conflict-resolution",
            Stage::ResolutionSummary => "resolution-summary",
            Stage::SynthesisAttempt => "synthesis-attempt",
            Stage::SynthesisSummary => "synthesis-summary",
            Stage::OutputGeneration => "output-generation",
            Stage::Finalize => "finalize",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::IndividualThought => "Individual Thought",
            Stage::MutualReflection => "Mutual Reflection",
            Stage::ReflectionSummary => "Reflection Summary",
            Stage::ConflictResolution => "Conflict Resolution",
            Stage::ResolutionSummary => "Resolution Summary",
            Stage::SynthesisAttempt => "Synthesis Attempt",
            Stage::SynthesisSummary => "Synthesis Summary",
            Stage::OutputGeneration => "Output Generation",
            Stage::Finalize => "Finalize",
        }
    }

    /// True for the optional compaction passes.
    pub fn is_summary(&self) -> bool {
        matches!(
            self,
            Stage::ReflectionSummary | Stage::ResolutionSummary | Stage::SynthesisSummary
        )
    }

    /// True for stages that require one response from every participant.
    pub fn is_agent_stage(&self) -> bool {
        !self.is_summary() && *self != Stage::Finalize
    }

    /// The stage following this one in the fixed sequence.
    pub fn next(&self) -> Option<Stage> {
        let index = Stage::SEQUENCE.iter().position(|s| s == self)?;
        Stage::SEQUENCE.get(index + 1).copied()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
