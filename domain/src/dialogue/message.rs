//! Transcript message entities

use crate::dialogue::stage::Stage;
use crate::persona::profile::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a transcript message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Agent(AgentId),
}

/// An entry in the session transcript (Entity)
///
/// Messages are append-only and owned by the session; agents read them
/// through the context window selector but never write directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    /// Sequence number grouping one query-response cycle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<u32>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            content: content.into(),
            timestamp: Utc::now(),
            stage: None,
            cycle: None,
        }
    }

    pub fn agent(id: AgentId, content: impl Into<String>) -> Self {
        Self {
            author: Author::Agent(id),
            content: content.into(),
            timestamp: Utc::now(),
            stage: None,
            cycle: None,
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_cycle(mut self, cycle: u32) -> Self {
        self.cycle = Some(cycle);
        self
    }

    pub fn is_from_user(&self) -> bool {
        self.author == Author::User
    }
}
