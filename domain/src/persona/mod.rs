//! Personality profiles and their derived quantities

pub mod confidence;
pub mod params;
pub mod profile;
pub mod roster;

pub use confidence::{PerformanceHistory, estimate_confidence};
pub use params::{GenerationParams, derive_generation_params};
pub use profile::{AgentId, MemoryScope, PersonalityProfile, Priority, ReasoningStyle};
pub use roster::{builtin_roster, select_personas};
