//! Personality profile value objects
//!
//! A [`PersonalityProfile`] binds a stable agent identity to the qualitative
//! traits that drive prompt composition, generation-parameter derivation and
//! confidence estimation. Profiles are created once at registration and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// Stable identity of a dialogue participant (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity used for condensed summary records produced by the
    /// pipeline itself rather than by a participant.
    pub fn facilitator() -> Self {
        Self("facilitator".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        AgentId::new(s)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        AgentId::new(s)
    }
}

/// Reasoning style of a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningStyle {
    Logical,
    Critical,
    Intuitive,
    Meta,
    Emotive,
    Analytical,
}

impl ReasoningStyle {
    pub fn as_str(&self) -> &str {
        match self {
            ReasoningStyle::Logical => "logical",
            ReasoningStyle::Critical => "critical",
            ReasoningStyle::Intuitive => "intuitive",
            ReasoningStyle::Meta => "meta",
            ReasoningStyle::Emotive => "emotive",
            ReasoningStyle::Analytical => "analytical",
        }
    }

    /// Short description of how this style approaches a problem,
    /// used in persona preambles and default derivation text.
    pub fn descriptor(&self) -> &str {
        match self {
            ReasoningStyle::Logical => "step-by-step deduction from stated premises",
            ReasoningStyle::Critical => "probing weaknesses and unstated assumptions",
            ReasoningStyle::Intuitive => "pattern-led leaps and analogies",
            ReasoningStyle::Meta => "reasoning about the discussion itself",
            ReasoningStyle::Emotive => "attention to human impact and tone",
            ReasoningStyle::Analytical => "decomposition into measurable parts",
        }
    }
}

impl std::fmt::Display for ReasoningStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReasoningStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logical" => Ok(ReasoningStyle::Logical),
            "critical" => Ok(ReasoningStyle::Critical),
            "intuitive" => Ok(ReasoningStyle::Intuitive),
            "meta" => Ok(ReasoningStyle::Meta),
            "emotive" => Ok(ReasoningStyle::Emotive),
            "analytical" => Ok(ReasoningStyle::Analytical),
            other => Err(format!("unknown reasoning style: {other}")),
        }
    }
}

/// What a participant optimizes for when responding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Precision,
    Breadth,
    Depth,
    Balance,
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Precision => "precision",
            Priority::Breadth => "breadth",
            Priority::Depth => "depth",
            Priority::Balance => "balance",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much transcript history an agent is allowed to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryScope {
    /// Only the last few messages
    Local,
    /// The current session's recent window
    Session,
    /// The entire transcript, including prior cycles
    CrossSession,
}

impl MemoryScope {
    pub fn as_str(&self) -> &str {
        match self {
            MemoryScope::Local => "local",
            MemoryScope::Session => "session",
            MemoryScope::CrossSession => "cross-session",
        }
    }
}

/// Immutable personality record for one dialogue participant (Value Object)
///
/// The free-text fields (`personality`, `tone`, `preferences`) are used only
/// as heuristic-matching input by the generation-parameter mapper and as
/// flavor in prompt preambles; they carry no structured meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub id: AgentId,
    pub display_name: String,
    pub style: ReasoningStyle,
    pub priority: Priority,
    pub memory_scope: MemoryScope,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub preferences: String,
    /// Additional name variants (including phonetic/Japanese forms)
    /// recognized by the reflection and vote extractors.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl PersonalityProfile {
    pub fn new(
        id: impl Into<AgentId>,
        display_name: impl Into<String>,
        style: ReasoningStyle,
        priority: Priority,
        memory_scope: MemoryScope,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            style,
            priority,
            memory_scope,
            personality: String::new(),
            tone: String::new(),
            preferences: String::new(),
            aliases: Vec::new(),
        }
    }

    pub fn with_personality(mut self, text: impl Into<String>) -> Self {
        self.personality = text.into();
        self
    }

    pub fn with_tone(mut self, text: impl Into<String>) -> Self {
        self.tone = text.into();
        self
    }

    pub fn with_preferences(mut self, text: impl Into<String>) -> Self {
        self.preferences = text.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// All names this participant answers to, lowercased for matching:
    /// identity, display name, then declared aliases.
    pub fn match_names(&self) -> Vec<String> {
        let mut names = vec![
            self.id.as_str().to_lowercase(),
            self.display_name.to_lowercase(),
        ];
        for alias in &self.aliases {
            names.push(alias.to_lowercase());
        }
        names.dedup();
        names
    }

    /// The free-text trait fields joined for keyword scanning.
    pub fn trait_text(&self) -> String {
        let mut text = String::new();
        for field in [&self.personality, &self.tone, &self.preferences] {
            if !field.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(field);
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> PersonalityProfile {
        PersonalityProfile::new(
            "sage",
            "Sage",
            ReasoningStyle::Logical,
            Priority::Precision,
            MemoryScope::Local,
        )
        .with_personality("precise and rigorous")
        .with_tone("calm")
        .with_alias("セージ")
    }

    #[test]
    fn test_match_names_include_alias() {
        let names = profile().match_names();
        assert!(names.contains(&"sage".to_string()));
        assert!(names.contains(&"セージ".to_string()));
    }

    #[test]
    fn test_trait_text_joins_fields() {
        let text = profile().trait_text();
        assert!(text.contains("rigorous"));
        assert!(text.contains("calm"));
    }

    #[test]
    fn test_style_parse_roundtrip() {
        for style in [
            ReasoningStyle::Logical,
            ReasoningStyle::Critical,
            ReasoningStyle::Intuitive,
            ReasoningStyle::Meta,
            ReasoningStyle::Emotive,
            ReasoningStyle::Analytical,
        ] {
            let parsed: ReasoningStyle = style.as_str().parse().unwrap();
            assert_eq!(style, parsed);
        }
        assert!("visionary".parse::<ReasoningStyle>().is_err());
    }

    #[test]
    fn test_facilitator_id() {
        assert_eq!(AgentId::facilitator().as_str(), "facilitator");
    }
}
