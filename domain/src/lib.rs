//! Domain layer for colloquy
//!
//! This crate contains the core business logic, entities, and value objects
//! of the staged dialogue and consensus engine. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Staged dialogue
//!
//! Personality-bound participants answer one query through a fixed stage
//! sequence (individual thought → mutual reflection → conflict resolution →
//! synthesis attempt → output generation → finalize), with optional summary
//! compaction passes between stages.
//!
//! ## Consensus
//!
//! The final stage's outputs carry explicit vote declarations; the
//! facilitator tallies them into a winner set, resolving ties with a
//! secondary reasoning pass and a deterministic fallback.

pub mod consensus;
pub mod core;
pub mod dialogue;
pub mod heuristics;
pub mod persona;
pub mod prompt;

// Re-export commonly used types
pub use consensus::{ConsensusResult, DecisionMethod, Vote, VoteTally, tally_votes};
pub use crate::core::{error::DomainError, query::Query};
pub use dialogue::{
    Author, DialogueOutcome, DialogueSession, Message, ReflectionRecord, SessionStatus, Stage,
    StageRecord, StageResponse, context_window, context_window_default,
};
pub use heuristics::{extract_vote, reflect_on_peer, reflect_on_peers};
pub use persona::{
    AgentId, GenerationParams, MemoryScope, PerformanceHistory, PersonalityProfile, Priority,
    ReasoningStyle, builtin_roster, derive_generation_params, estimate_confidence,
    select_personas,
};
pub use prompt::StagePrompt;
