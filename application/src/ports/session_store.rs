//! Session persistence port
//!
//! The core reads and writes whole-session snapshots; the at-rest encoding
//! belongs to the adapter.

use async_trait::async_trait;
use colloquy_domain::DialogueSession;
use thiserror::Error;

/// Errors that can occur during session persistence
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Session not found: {0}")]
    NotFound(String),
}

/// Repository for whole-session snapshots
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a snapshot of the session, replacing any prior snapshot.
    async fn save(&self, session: &DialogueSession) -> Result<(), StoreError>;

    /// Load a session snapshot by id.
    async fn load(&self, id: &str) -> Result<DialogueSession, StoreError>;

    /// List the ids of stored sessions.
    async fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// No-op store for when persistence is disabled
pub struct NoSessionStore;

#[async_trait]
impl SessionStore for NoSessionStore {
    async fn save(&self, _session: &DialogueSession) -> Result<(), StoreError> {
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<DialogueSession, StoreError> {
        Err(StoreError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(Vec::new())
    }
}
