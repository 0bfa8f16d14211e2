//! Application layer for colloquy
//!
//! This crate contains the agent, use cases, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod agent;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use agent::{Agent, DerivationHooks};
pub use config::DialogueParams;
pub use ports::{
    interaction_log::{InteractionEvent, InteractionLogger, NoInteractionLog},
    progress::{DialogueProgressNotifier, NoProgress},
    reasoner::{Reasoner, ReasonerError, ReasonerReply},
    session_store::{NoSessionStore, SessionStore, StoreError},
};
pub use use_cases::resolve_consensus::FacilitateConsensusUseCase;
pub use use_cases::run_dialogue::{RunDialogueError, RunDialogueInput, RunDialogueUseCase};
