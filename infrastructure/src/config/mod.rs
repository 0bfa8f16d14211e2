//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{BehaviorConfig, FileConfig, ReasonerConfig, RosterConfig};
pub use loader::ConfigLoader;
