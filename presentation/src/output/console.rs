//! Console output formatter for dialogue outcomes

use crate::output::formatter::OutcomeFormatter;
use colloquy_domain::{DecisionMethod, DialogueOutcome};
use colored::Colorize;

/// Formats dialogue outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete dialogue outcome
    pub fn format(outcome: &DialogueOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Colloquy Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Query:".cyan().bold(),
            outcome.query
        ));

        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            outcome
                .participants
                .iter()
                .map(|id| outcome.display_name(id))
                .collect::<Vec<_>>()
                .join(", ")
        ));

        for record in outcome.session.history() {
            output.push_str(&Self::section_header(record.stage.display_name()));
            for response in &record.responses {
                let name = outcome.display_name(&response.agent);
                if response.success {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        format!("── {} (confidence {:.2}) ──", name, response.confidence)
                            .yellow()
                            .bold(),
                        response.content
                    ));
                } else {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        format!("── {} (fallback) ──", name).red().bold(),
                        response.content
                    ));
                }
            }
        }

        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&format!("\n{}\n", "Tally:".cyan().bold()));
        for line in outcome.consensus.tally.count_lines() {
            output.push_str(&format!("  {}\n", line));
        }
        output.push_str(&format!(
            "\n{} {} ({})\n",
            "Winners:".green().bold(),
            outcome
                .winners
                .iter()
                .map(|id| outcome.display_name(id))
                .collect::<Vec<_>>()
                .join(", "),
            Self::method_label(outcome.consensus.method),
        ));

        if !outcome.conclusion.is_empty() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Conclusion:".cyan().bold(),
                outcome.conclusion
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &DialogueOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format only the conclusion (concise output)
    pub fn format_conclusion_only(outcome: &DialogueOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Colloquy Conclusion ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), outcome.query));

        output.push_str(&format!(
            "{} {}\n\n",
            "Elected:".dimmed(),
            outcome
                .winners
                .iter()
                .map(|id| outcome.display_name(id))
                .collect::<Vec<_>>()
                .join(", ")
        ));

        output.push_str(&outcome.conclusion);
        output.push('\n');

        output
    }

    fn method_label(method: DecisionMethod) -> &'static str {
        match method {
            DecisionMethod::Tally => "by tally",
            DecisionMethod::TieBreak => "tie broken",
            DecisionMethod::Fallback => "deterministic fallback",
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutcomeFormatter for ConsoleFormatter {
    fn format(&self, outcome: &DialogueOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &DialogueOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_conclusion_only(&self, outcome: &DialogueOutcome) -> String {
        Self::format_conclusion_only(outcome)
    }
}
