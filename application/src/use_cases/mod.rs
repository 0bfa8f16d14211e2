//! Use cases orchestrating the domain

pub mod resolve_consensus;
pub mod run_dialogue;

pub use resolve_consensus::FacilitateConsensusUseCase;
pub use run_dialogue::{RunDialogueError, RunDialogueInput, RunDialogueUseCase};
