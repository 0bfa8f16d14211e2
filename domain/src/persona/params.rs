//! Personality-to-generation-parameter mapping.
//!
//! Translates a profile's qualitative trait vocabulary into the bounded
//! numeric knobs a text-generation backend understands. This is a pure
//! heuristic: the same profile always yields the same tuple, keyword
//! matches contribute small additive adjustments, and every knob is
//! clamped to its documented closed interval.

use crate::heuristics::lexicon::{ANALYTICAL_MARKERS, CREATIVE_MARKERS, GENTLE_MARKERS};
use crate::persona::profile::PersonalityProfile;
use serde::{Deserialize, Serialize};

/// Bounded generation knobs derived from a personality profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Exploration breadth (temperature-like), in [0.10, 1.00].
    pub exploration: f64,
    /// Nucleus sampling cutoff, in [0.70, 1.00].
    pub nucleus: f64,
    /// Repetition damping factor, in [1.00, 1.30].
    pub repetition_damping: f64,
    /// Presence-style novelty penalty, in [0.00, 0.20].
    pub novelty_presence: f64,
    /// Frequency-style novelty penalty, in [0.00, 0.20].
    pub novelty_frequency: f64,
    /// Candidate pool size (top-k), in [10, 100].
    pub candidate_pool: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            exploration: 0.70,
            nucleus: 0.90,
            repetition_damping: 1.10,
            novelty_presence: 0.05,
            novelty_frequency: 0.05,
            candidate_pool: 40,
        }
    }
}

impl GenerationParams {
    /// True when the exploration knob leans toward divergent output.
    pub fn is_exploratory(&self) -> bool {
        self.exploration >= 0.75
    }
}

/// Derive the generation knobs for a profile.
///
/// Each keyword match in the profile's free-text trait fields contributes
/// a small additive adjustment; sums are clamped to the knob ranges and
/// rounded to two decimal places (integer for the pool size).
pub fn derive_generation_params(profile: &PersonalityProfile) -> GenerationParams {
    let text = profile.trait_text().to_lowercase();

    let base = GenerationParams::default();
    let mut exploration = base.exploration;
    let mut nucleus = base.nucleus;
    let mut repetition_damping = base.repetition_damping;
    let mut novelty_presence = base.novelty_presence;
    let mut novelty_frequency = base.novelty_frequency;
    let mut pool = base.candidate_pool as i64;

    for marker in CREATIVE_MARKERS {
        if text.contains(marker) {
            exploration += 0.05;
            nucleus += 0.01;
            novelty_presence += 0.02;
            novelty_frequency += 0.02;
            pool += 8;
        }
    }

    for marker in ANALYTICAL_MARKERS {
        if text.contains(marker) {
            exploration -= 0.05;
            nucleus -= 0.02;
            repetition_damping += 0.03;
            pool -= 6;
        }
    }

    // Gentle vocabulary pulls against the analytical direction on a
    // subset of knobs.
    for marker in GENTLE_MARKERS {
        if text.contains(marker) {
            exploration += 0.03;
            repetition_damping -= 0.03;
            pool -= 4;
        }
    }

    GenerationParams {
        exploration: round2(exploration.clamp(0.10, 1.00)),
        nucleus: round2(nucleus.clamp(0.70, 1.00)),
        repetition_damping: round2(repetition_damping.clamp(1.00, 1.30)),
        novelty_presence: round2(novelty_presence.clamp(0.00, 0.20)),
        novelty_frequency: round2(novelty_frequency.clamp(0.00, 0.20)),
        candidate_pool: pool.clamp(10, 100) as u32,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
