//! Confidence estimation for stage responses.
//!
//! The confidence score is a bounded heuristic, not a calibrated
//! probability: closed delta tables for style, priority and stage are
//! summed onto a fixed baseline together with context-shape and
//! historical-performance adjustments, then clamped to [0.10, 0.95].

use crate::dialogue::message::Message;
use crate::dialogue::stage::Stage;
use crate::persona::profile::{Priority, ReasoningStyle};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const BASELINE: f64 = 0.60;
const MIN_CONFIDENCE: f64 = 0.10;
const MAX_CONFIDENCE: f64 = 0.95;

/// Running success/failure counts for one agent's reasoner invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceHistory {
    pub successes: u32,
    pub total: u32,
}

impl PerformanceHistory {
    pub fn record(&mut self, success: bool) {
        self.total += 1;
        if success {
            self.successes += 1;
        }
    }

    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.successes as f64 / self.total as f64)
        }
    }
}

/// Estimate the confidence of a stage response.
///
/// Absent inputs contribute zero; the result always lies in [0.10, 0.95].
pub fn estimate_confidence(
    style: ReasoningStyle,
    priority: Priority,
    stage: Stage,
    context: &[Message],
    history: Option<&PerformanceHistory>,
) -> f64 {
    let mut value = BASELINE;
    value += style_delta(style);
    value += priority_delta(priority);
    value += stage_delta(stage);
    value += context_delta(context);

    if let Some(history) = history
        && let Some(rate) = history.success_rate()
    {
        value += ((rate - 0.8) * 0.3).clamp(-0.10, 0.10);
        value += error_rate_delta(1.0 - rate);
    }

    value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

fn style_delta(style: ReasoningStyle) -> f64 {
    match style {
        ReasoningStyle::Logical => 0.10,
        ReasoningStyle::Critical => -0.05,
        ReasoningStyle::Meta => 0.15,
        ReasoningStyle::Analytical => 0.08,
        ReasoningStyle::Emotive => 0.02,
        ReasoningStyle::Intuitive => 0.05,
    }
}

fn priority_delta(priority: Priority) -> f64 {
    match priority {
        Priority::Precision => -0.10,
        Priority::Breadth => 0.05,
        Priority::Depth => 0.02,
        Priority::Balance => 0.03,
    }
}

fn stage_delta(stage: Stage) -> f64 {
    match stage {
        Stage::IndividualThought => 0.05,
        Stage::MutualReflection => 0.02,
        Stage::ConflictResolution => -0.05,
        Stage::SynthesisAttempt => -0.03,
        Stage::OutputGeneration => 0.03,
        _ => 0.0,
    }
}

fn context_delta(context: &[Message]) -> f64 {
    let mut delta = 0.0;

    let len = context.len();
    if len > 20 {
        delta -= 0.05;
    } else if len > 10 {
        delta -= 0.02;
    } else if len < 5 {
        delta += 0.02;
    }

    if context
        .iter()
        .any(|m| m.stage == Some(Stage::ConflictResolution))
    {
        delta -= 0.03;
    }

    let distinct_stages: HashSet<_> = context.iter().filter_map(|m| m.stage).collect();
    if distinct_stages.len() > 2 {
        delta -= 0.02;
    }

    delta
}

fn error_rate_delta(error_rate: f64) -> f64 {
    if error_rate > 0.30 {
        -0.15
    } else if error_rate > 0.10 {
        -0.08
    } else if error_rate < 0.05 {
        0.05
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::profile::AgentId;

    fn messages(n: usize, stage: Option<Stage>) -> Vec<Message> {
        (0..n)
            .map(|i| {
                let m = Message::agent(AgentId::new("a"), format!("m{i}"));
                match stage {
                    Some(s) => m.with_stage(s),
                    None => m,
                }
            })
            .collect()
    }

    #[test]
    fn test_baseline_composition() {
        // Logical +0.10, Precision -0.10, IndividualThought +0.05,
        // empty context +0.02 => 0.67
        let value = estimate_confidence(
            ReasoningStyle::Logical,
            Priority::Precision,
            Stage::IndividualThought,
            &[],
            None,
        );
        assert!((value - 0.67).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_high() {
        let mut history = PerformanceHistory::default();
        for _ in 0..20 {
            history.record(true);
        }
        let value = estimate_confidence(
            ReasoningStyle::Meta,
            Priority::Breadth,
            Stage::IndividualThought,
            &[],
            Some(&history),
        );
        assert!(value <= 0.95);
    }

    #[test]
    fn test_clamped_low() {
        let mut history = PerformanceHistory::default();
        for _ in 0..20 {
            history.record(false);
        }
        let context = messages(30, Some(Stage::ConflictResolution));
        let value = estimate_confidence(
            ReasoningStyle::Critical,
            Priority::Precision,
            Stage::ConflictResolution,
            &context,
            Some(&history),
        );
        assert!(value >= 0.10);
    }

    #[test]
    fn test_long_context_lowers_confidence() {
        let short = estimate_confidence(
            ReasoningStyle::Logical,
            Priority::Balance,
            Stage::MutualReflection,
            &messages(6, None),
            None,
        );
        let long = estimate_confidence(
            ReasoningStyle::Logical,
            Priority::Balance,
            Stage::MutualReflection,
            &messages(25, None),
            None,
        );
        assert!(long < short);
    }

    #[test]
    fn test_distinct_stage_spread_lowers_confidence() {
        let mut context = messages(3, Some(Stage::IndividualThought));
        context.extend(messages(3, Some(Stage::MutualReflection)));
        context.extend(messages(3, Some(Stage::SynthesisAttempt)));

        let spread = estimate_confidence(
            ReasoningStyle::Logical,
            Priority::Balance,
            Stage::SynthesisAttempt,
            &context,
            None,
        );
        let narrow = estimate_confidence(
            ReasoningStyle::Logical,
            Priority::Balance,
            Stage::SynthesisAttempt,
            &messages(9, Some(Stage::IndividualThought)),
            None,
        );
        assert!(spread < narrow);
    }

    #[test]
    fn test_absent_history_contributes_zero() {
        let without = estimate_confidence(
            ReasoningStyle::Emotive,
            Priority::Depth,
            Stage::OutputGeneration,
            &messages(7, None),
            None,
        );
        let empty = PerformanceHistory::default();
        let with_empty = estimate_confidence(
            ReasoningStyle::Emotive,
            Priority::Depth,
            Stage::OutputGeneration,
            &messages(7, None),
            Some(&empty),
        );
        assert_eq!(without, with_empty);
    }

    #[test]
    fn test_history_moves_the_score() {
        let mut good = PerformanceHistory::default();
        for _ in 0..20 {
            good.record(true);
        }
        let mut poor = PerformanceHistory::default();
        for i in 0..20 {
            poor.record(i % 2 == 0);
        }

        let base_args = (
            ReasoningStyle::Logical,
            Priority::Balance,
            Stage::IndividualThought,
        );
        let high = estimate_confidence(base_args.0, base_args.1, base_args.2, &[], Some(&good));
        let low = estimate_confidence(base_args.0, base_args.1, base_args.2, &[], Some(&poor));
        assert!(high > low);
    }
}
