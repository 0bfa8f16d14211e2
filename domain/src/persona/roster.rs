//! Built-in persona roster.
//!
//! Five participants with complementary styles. These are plain data;
//! behavior differences come entirely from the profile fields flowing
//! through the parameter mapper, the confidence estimator and the prompt
//! preambles.

use crate::persona::profile::{MemoryScope, PersonalityProfile, Priority, ReasoningStyle};

/// The default five-persona roster.
pub fn builtin_roster() -> Vec<PersonalityProfile> {
    vec![
        PersonalityProfile::new(
            "sage",
            "Sage",
            ReasoningStyle::Logical,
            Priority::Precision,
            MemoryScope::Local,
        )
        .with_personality("precise, rigorous, systematic thinker")
        .with_tone("calm and measured")
        .with_preferences("prefers explicit premises and numbered arguments")
        .with_alias("セージ"),
        PersonalityProfile::new(
            "critic",
            "Critic",
            ReasoningStyle::Critical,
            Priority::Depth,
            MemoryScope::Session,
        )
        .with_personality("skeptical, exact, probing")
        .with_tone("direct, occasionally blunt")
        .with_preferences("hunts for counterexamples before conceding a point")
        .with_alias("クリティック"),
        PersonalityProfile::new(
            "muse",
            "Muse",
            ReasoningStyle::Intuitive,
            Priority::Breadth,
            MemoryScope::Local,
        )
        .with_personality("creative, imaginative, playful and curious")
        .with_tone("expressive and bold")
        .with_preferences("reaches for analogies and unexpected framings")
        .with_alias("ミューズ"),
        PersonalityProfile::new(
            "observer",
            "Observer",
            ReasoningStyle::Meta,
            Priority::Balance,
            MemoryScope::CrossSession,
        )
        .with_personality("detached, systematic watcher of the conversation itself")
        .with_tone("neutral")
        .with_preferences("tracks where the group agrees and where it talks past itself")
        .with_alias("オブザーバー"),
        PersonalityProfile::new(
            "heart",
            "Heart",
            ReasoningStyle::Emotive,
            Priority::Balance,
            MemoryScope::Session,
        )
        .with_personality("warm, empathetic, caring")
        .with_tone("gentle and encouraging")
        .with_preferences("weighs how an answer lands with the people affected")
        .with_alias("ハート"),
    ]
}

/// Select a subset of the built-in roster by persona id.
///
/// Unknown names are ignored; an empty selection yields the full roster.
pub fn select_personas(names: &[String]) -> Vec<PersonalityProfile> {
    let roster = builtin_roster();
    if names.is_empty() {
        return roster;
    }
    let wanted: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
    roster
        .into_iter()
        .filter(|p| wanted.contains(&p.id.as_str().to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_has_five_distinct_personas() {
        let roster = builtin_roster();
        assert_eq!(roster.len(), 5);

        let mut ids: Vec<_> = roster.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_every_persona_has_a_phonetic_alias() {
        for persona in builtin_roster() {
            assert!(
                !persona.aliases.is_empty(),
                "{} has no alias",
                persona.id
            );
        }
    }

    #[test]
    fn test_select_personas_by_name() {
        let selected = select_personas(&["sage".to_string(), "MUSE".to_string()]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id.as_str(), "sage");
        assert_eq!(selected[1].id.as_str(), "muse");
    }

    #[test]
    fn test_select_empty_returns_full_roster() {
        assert_eq!(select_personas(&[]).len(), 5);
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let selected = select_personas(&["sage".to_string(), "nobody".to_string()]);
        assert_eq!(selected.len(), 1);
    }
}
