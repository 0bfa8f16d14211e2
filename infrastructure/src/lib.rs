//! Infrastructure layer for colloquy
//!
//! This crate contains adapters for the application ports: configuration
//! loading, the JSONL interaction audit log, the JSON-file session store,
//! and the reasoner backends (HTTP and scripted).

pub mod config;
pub mod logging;
pub mod reasoner;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlInteractionLogger;
pub use reasoner::{FailingReasoner, HttpReasoner, ScriptedReasoner};
pub use store::JsonFileSessionStore;
