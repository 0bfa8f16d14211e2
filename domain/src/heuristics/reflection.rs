//! Reflection extraction from free-form stage output.
//!
//! Given one agent's mutual-reflection text and the set of peers under
//! consideration, produce one [`ReflectionRecord`] per peer. This is pure
//! pattern matching over lines: it may mis-classify ambiguous prose, and it
//! never fails — absence of a signal degrades to an explicit
//! no-engagement record.

use crate::dialogue::response::ReflectionRecord;
use crate::heuristics::lexicon::{NEGATIVE_MARKERS, NO_ENGAGEMENT_REACTION, POSITIVE_MARKERS};
use crate::persona::profile::PersonalityProfile;

const MAX_QUESTIONS: usize = 3;
const MIN_QUESTION_CHARS: usize = 5;
const MIN_REACTION_CHARS: usize = 10;
const MAX_REACTION_CHARS: usize = 200;

/// Produce a reflection record for every peer.
pub fn reflect_on_peers(text: &str, peers: &[PersonalityProfile]) -> Vec<ReflectionRecord> {
    peers.iter().map(|peer| reflect_on_peer(text, peer)).collect()
}

/// Produce the reflection record for a single peer.
pub fn reflect_on_peer(text: &str, peer: &PersonalityProfile) -> ReflectionRecord {
    let names = peer.match_names();

    let mention_lines: Vec<&str> = text
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            names.iter().any(|name| lower.contains(name))
        })
        .collect();

    if mention_lines.is_empty() {
        return ReflectionRecord::no_engagement(peer.id.clone(), NO_ENGAGEMENT_REACTION);
    }

    // Contrast/negative vocabulary wins over positive vocabulary; neither
    // matching defaults to agreement=false.
    let disagreement = mention_lines.iter().any(|line| {
        let lower = line.to_lowercase();
        NEGATIVE_MARKERS.iter().any(|m| lower.contains(m))
    });
    let agreement = !disagreement
        && mention_lines.iter().any(|line| {
            let lower = line.to_lowercase();
            POSITIVE_MARKERS.iter().any(|m| lower.contains(m))
        });

    let questions = extract_questions(&mention_lines);
    let reaction = representative_reaction(&mention_lines, peer);

    ReflectionRecord::engaged(peer.id.clone(), reaction, agreement, questions)
}

/// Clauses ending in a question mark on mention lines, trimmed and
/// length-filtered, at most [`MAX_QUESTIONS`].
fn extract_questions(lines: &[&str]) -> Vec<String> {
    let mut questions = Vec::new();
    for line in lines {
        let mut clause = String::new();
        for c in line.chars() {
            match c {
                '?' | '？' => {
                    clause.push(c);
                    let trimmed = clause.trim();
                    if trimmed.chars().count() > MIN_QUESTION_CHARS {
                        questions.push(trimmed.to_string());
                        if questions.len() == MAX_QUESTIONS {
                            return questions;
                        }
                    }
                    clause.clear();
                }
                '.' | '!' | '。' | '！' => clause.clear(),
                _ => clause.push(c),
            }
        }
    }
    questions
}

/// The first mention line of presentable length, or a generic fallback.
fn representative_reaction(lines: &[&str], peer: &PersonalityProfile) -> String {
    for line in lines {
        let trimmed = line.trim();
        let chars = trimmed.chars().count();
        if chars > MIN_REACTION_CHARS && chars < MAX_REACTION_CHARS {
            return trimmed.to_string();
        }
    }
    format!(
        "mentioned {} without an extended reaction",
        peer.display_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::profile::{MemoryScope, Priority, ReasoningStyle};

    fn peer(id: &str, name: &str, alias: &str) -> PersonalityProfile {
        PersonalityProfile::new(
            id,
            name,
            ReasoningStyle::Logical,
            Priority::Balance,
            MemoryScope::Local,
        )
        .with_alias(alias)
    }

    #[test]
    fn test_positive_mention_yields_agreement() {
        let muse = peer("muse", "Muse", "ミューズ");
        let text = "I agree with Muse, the framing is insightful and well grounded.";
        let record = reflect_on_peer(text, &muse);

        assert!(record.agreement);
        assert!(record.reaction.contains("Muse"));
        assert!(record.questions.is_empty());
    }

    #[test]
    fn test_negative_vocabulary_wins_over_positive() {
        let sage = peer("sage", "Sage", "セージ");
        let text = "Sage makes a good point, however the second premise is flawed.";
        let record = reflect_on_peer(text, &sage);
        assert!(!record.agreement);
    }

    #[test]
    fn test_no_mention_yields_no_engagement() {
        let critic = peer("critic", "Critic", "クリティック");
        let text = "The architecture should favor small modules.\nNothing else to add.";
        let record = reflect_on_peer(text, &critic);

        assert!(!record.agreement);
        assert!(record.questions.is_empty());
        assert_eq!(record.reaction, NO_ENGAGEMENT_REACTION);
    }

    #[test]
    fn test_questions_extracted_from_mention_lines_only() {
        let heart = peer("heart", "Heart", "ハート");
        let text = "\
Why is this fast? That question is off-topic.
Heart raises users' needs. But did Heart consider operators' needs? And what about cost?";
        let record = reflect_on_peer(text, &heart);

        assert_eq!(record.questions.len(), 2);
        assert!(record.questions[0].contains("operators"));
        assert!(record.questions[1].contains("cost"));
    }

    #[test]
    fn test_question_cap_at_three() {
        let sage = peer("sage", "Sage", "セージ");
        let text = "Sage, why A? why is B? what of C? and then D? maybe E?";
        let record = reflect_on_peer(text, &sage);
        assert_eq!(record.questions.len(), 3);
    }

    #[test]
    fn test_short_questions_filtered() {
        let sage = peer("sage", "Sage", "セージ");
        let text = "Sage said X. ok? I want to understand the full argument here?";
        let record = reflect_on_peer(text, &sage);
        assert_eq!(record.questions.len(), 1);
        assert!(record.questions[0].contains("full argument"));
    }

    #[test]
    fn test_japanese_alias_and_sentiment() {
        let muse = peer("muse", "Muse", "ミューズ");
        let text = "ミューズの発想に賛成です。とても鋭い視点だと思います。";
        let record = reflect_on_peer(text, &muse);
        assert!(record.agreement);
    }

    #[test]
    fn test_reaction_fallback_for_terse_mentions() {
        let sage = peer("sage", "Sage", "セージ");
        let record = reflect_on_peer("Sage: yes.", &sage);
        assert!(record.reaction.contains("Sage"));
        assert!(record.reaction.contains("without an extended reaction"));
    }

    #[test]
    fn test_reflect_on_peers_covers_everyone() {
        let peers = vec![
            peer("sage", "Sage", "セージ"),
            peer("muse", "Muse", "ミューズ"),
        ];
        let records = reflect_on_peers("I agree with Sage's framing entirely.", &peers);
        assert_eq!(records.len(), 2);
        assert!(records[0].agreement);
        assert!(!records[1].agreement);
    }
}
