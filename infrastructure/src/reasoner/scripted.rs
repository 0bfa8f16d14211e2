//! Scripted reasoner adapters.
//!
//! [`ScriptedReasoner`] is the default no-network backend: it serves a
//! queue of canned replies, then a fixed default line once the queue is
//! exhausted. [`FailingReasoner`] always fails, for exercising the
//! pipeline's degraded path.

use async_trait::async_trait;
use colloquy_application::ports::reasoner::{Reasoner, ReasonerError, ReasonerReply};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

const DEFAULT_REPLY: &str =
    "Offline reasoner: no scripted reply remains, so only a placeholder \
     contribution is offered here.";

/// Reasoner serving canned replies in order
pub struct ScriptedReasoner {
    replies: Mutex<VecDeque<String>>,
    default_reply: String,
}

impl ScriptedReasoner {
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            default_reply: DEFAULT_REPLY.to_string(),
        }
    }

    /// An empty script: every call returns the default line.
    pub fn offline() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_default(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn execute(&self, _instruction: &str) -> Result<ReasonerReply, ReasonerError> {
        let content = self
            .replies
            .lock()
            .map_err(|_| ReasonerError::Unavailable("script poisoned".to_string()))?
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());
        Ok(ReasonerReply::new(content, Duration::from_millis(1)))
    }
}

/// Reasoner that always fails
pub struct FailingReasoner;

#[async_trait]
impl Reasoner for FailingReasoner {
    async fn execute(&self, _instruction: &str) -> Result<ReasonerReply, ReasonerError> {
        Err(ReasonerError::Unavailable(
            "no reasoner backend configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_served_in_order() {
        let reasoner =
            ScriptedReasoner::new(vec!["first".to_string(), "second".to_string()]);

        assert_eq!(reasoner.execute("a").await.unwrap().content, "first");
        assert_eq!(reasoner.execute("b").await.unwrap().content, "second");
        assert!(
            reasoner
                .execute("c")
                .await
                .unwrap()
                .content
                .contains("Offline reasoner")
        );
    }

    #[tokio::test]
    async fn test_custom_default_reply() {
        let reasoner = ScriptedReasoner::offline().with_default("steady answer");
        assert_eq!(reasoner.execute("x").await.unwrap().content, "steady answer");
        assert_eq!(reasoner.execute("y").await.unwrap().content, "steady answer");
    }

    #[tokio::test]
    async fn test_failing_reasoner_always_fails() {
        let reasoner = FailingReasoner;
        assert!(reasoner.execute("anything").await.is_err());
    }
}
