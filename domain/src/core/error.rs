//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No participants configured for the dialogue")]
    NoParticipants,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Stage order violation: expected {expected}, got {got}")]
    StageOrder { expected: String, got: String },

    #[error("Session {0} is not active")]
    SessionNotActive(String),

    #[error("Session {0} is not at a terminal stage")]
    SessionNotTerminal(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::NoParticipants.is_cancelled());
        assert!(
            !DomainError::SessionNotActive("s-1".to_string()).is_cancelled()
        );
    }
}
