//! Output formatting trait

use colloquy_domain::DialogueOutcome;

/// Formats dialogue outcomes for display
pub trait OutcomeFormatter {
    /// Format the complete outcome with every stage
    fn format(&self, outcome: &DialogueOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &DialogueOutcome) -> String;

    /// Format only the elected conclusion
    fn format_conclusion_only(&self, outcome: &DialogueOutcome) -> String;
}
