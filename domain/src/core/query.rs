//! Query value object

use serde::{Deserialize, Serialize};

/// The user question driving one dialogue cycle (Value Object)
///
/// A query enters the stage pipeline once and is visible to every
/// participating agent in every stage instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    content: String,
}

impl Query {
    /// Create a new query
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Query cannot be empty");
        Self { content }
    }

    /// Try to create a new query, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Query::new(s)
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Query::new(s)
    }
}
