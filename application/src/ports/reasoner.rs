//! Reasoner port
//!
//! The external text-completion capability an agent delegates prompt
//! execution to. The core never depends on which backend services this;
//! adapters live in the infrastructure layer.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur at the reasoner boundary
#[derive(Error, Debug)]
pub enum ReasonerError {
    #[error("Reasoner unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty completion")]
    EmptyCompletion,

    #[error("Timeout")]
    Timeout,
}

/// A successful reasoner completion
#[derive(Debug, Clone)]
pub struct ReasonerReply {
    pub content: String,
    /// Wall-clock duration of the invocation, reported by the adapter
    pub duration: Duration,
}

impl ReasonerReply {
    pub fn new(content: impl Into<String>, duration: Duration) -> Self {
        Self {
            content: content.into(),
            duration,
        }
    }
}

/// Gateway to the text-completion capability
///
/// Implementations are expected to enforce their own timeouts and report
/// failure upward rather than block indefinitely; the pipeline recovers
/// from failures locally and never aborts a stage because of one.
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Execute a composed instruction and return the completion text.
    async fn execute(&self, instruction: &str) -> Result<ReasonerReply, ReasonerError>;
}
