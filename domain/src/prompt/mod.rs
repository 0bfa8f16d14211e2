//! Prompt templates for the staged dialogue flow.
//!
//! Every instruction an agent sends to the reasoner is composed here: a
//! personality-derived preamble merged with the stage-specific inputs.
//! Keeping composition in the domain keeps the pipeline controller free of
//! string formatting.

use crate::dialogue::response::StageResponse;
use crate::dialogue::stage::Stage;
use crate::persona::params::GenerationParams;
use crate::persona::profile::PersonalityProfile;

/// Per-response excerpt length used when a summary pass is unavailable and
/// prior-stage outputs are carried forward mechanically.
const DIGEST_EXCERPT_CHARS: usize = 600;

/// Templates for generating stage instructions
pub struct StagePrompt;

impl StagePrompt {
    /// Personality preamble prepended to every stage instruction.
    ///
    /// The derived exploration knob selects the register line, which is the
    /// pipeline's visible dependency on the parameter mapper.
    pub fn persona_preamble(profile: &PersonalityProfile, params: &GenerationParams) -> String {
        let register = if params.is_exploratory() {
            "Favor divergent directions before settling on an answer."
        } else {
            "Stay close to what can be justified directly."
        };
        format!(
            "You are {name}, a discussion participant whose reasoning style is {style}: {descriptor}.\n\
             You optimize for {priority}. Personality: {personality}. Tone: {tone}.\n\
             {register}",
            name = profile.display_name,
            style = profile.style,
            descriptor = profile.style.descriptor(),
            priority = profile.priority,
            personality = profile.personality,
            tone = profile.tone,
        )
    }

    /// Stage 1: independent first take on the query.
    pub fn individual_thought(
        profile: &PersonalityProfile,
        params: &GenerationParams,
        query: &str,
    ) -> String {
        format!(
            "{preamble}\n\n\
             Give your own initial answer to the following question, without \
             reference to anyone else's view:\n\n{query}",
            preamble = Self::persona_preamble(profile, params),
        )
    }

    /// Stage 2: react to every peer's initial thought by name.
    pub fn mutual_reflection(
        profile: &PersonalityProfile,
        params: &GenerationParams,
        query: &str,
        peer_thoughts: &[(String, String)],
    ) -> String {
        let mut prompt = format!(
            "{preamble}\n\n\
             Original question: {query}\n\n\
             Your peers answered as follows:\n",
            preamble = Self::persona_preamble(profile, params),
        );
        for (name, content) in peer_thoughts {
            prompt.push_str(&format!("\n--- {name} ---\n{content}\n"));
        }
        prompt.push_str(
            "\nReact to each peer by name: where you agree, where you disagree, \
             and any question you would put to them.",
        );
        prompt
    }

    /// Stage 3: work through the disagreements carried from reflection.
    pub fn conflict_resolution(
        profile: &PersonalityProfile,
        params: &GenerationParams,
        query: &str,
        carry: &str,
    ) -> String {
        format!(
            "{preamble}\n\n\
             Original question: {query}\n\n\
             State of the discussion so far:\n{carry}\n\n\
             Identify the substantive disagreements above and argue for how \
             each should be resolved.",
            preamble = Self::persona_preamble(profile, params),
        )
    }

    /// Stage 4: propose a complete synthesis.
    pub fn synthesis_attempt(
        profile: &PersonalityProfile,
        params: &GenerationParams,
        query: &str,
        carry: &str,
    ) -> String {
        format!(
            "{preamble}\n\n\
             Original question: {query}\n\n\
             State of the discussion so far:\n{carry}\n\n\
             Propose one complete answer that incorporates the strongest \
             points raised by the group.",
            preamble = Self::persona_preamble(profile, params),
        )
    }

    /// Stage 5: final output plus an explicit vote declaration.
    pub fn output_generation(
        profile: &PersonalityProfile,
        params: &GenerationParams,
        query: &str,
        carry: &str,
        candidates: &[String],
    ) -> String {
        format!(
            "{preamble}\n\n\
             Original question: {query}\n\n\
             State of the discussion so far:\n{carry}\n\n\
             Write your final version of the group's answer. Then, on its own \
             line, name the participant (other than yourself) whose \
             contribution was strongest, in the form \"Vote: <name>\". \
             Candidates: {candidates}.",
            preamble = Self::persona_preamble(profile, params),
            candidates = candidates.join(", "),
        )
    }

    /// Compaction instruction for the optional summary passes.
    pub fn summary(stage: Stage, responses: &[(String, String)]) -> String {
        let mut prompt = format!(
            "Condense the following {stage} responses into one short record \
             that preserves every position and every open disagreement. Do \
             not add commentary.\n",
            stage = stage.display_name().to_lowercase(),
        );
        for (name, content) in responses {
            prompt.push_str(&format!("\n--- {name} ---\n{content}\n"));
        }
        prompt
    }

    /// Tie-break instruction for the facilitator (§ consensus resolution).
    pub fn tie_break(tally_lines: &[String], excerpts: &[(String, String)]) -> String {
        let mut prompt = String::from(
            "A vote among discussion participants ended in a tie. The tally:\n",
        );
        for line in tally_lines {
            prompt.push_str(&format!("  {line}\n"));
        }
        if !excerpts.is_empty() {
            prompt.push_str("\nVoters' stated reasons:\n");
            for (voter, reason) in excerpts {
                prompt.push_str(&format!("  {voter}: {reason}\n"));
            }
        }
        prompt.push_str(
            "\nName every participant who deserves to be counted a co-equal \
             winner, comma-separated, and nothing else.",
        );
        prompt
    }

    /// Mechanical digest of stage responses, used as the carry input when
    /// no summary pass runs (or as the fallback when one fails).
    pub fn digest(responses: &[StageResponse], roster: &[PersonalityProfile]) -> String {
        let mut digest = String::new();
        for response in responses {
            let name = roster
                .iter()
                .find(|p| p.id == response.agent)
                .map(|p| p.display_name.as_str())
                .unwrap_or_else(|| response.agent.as_str());
            let excerpt: String = response.content.chars().take(DIGEST_EXCERPT_CHARS).collect();
            digest.push_str(&format!("--- {name} ---\n{excerpt}\n"));
        }
        digest
    }
}
