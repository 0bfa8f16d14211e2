//! Reasoner adapters

pub mod http;
pub mod scripted;

pub use http::HttpReasoner;
pub use scripted::{FailingReasoner, ScriptedReasoner};
