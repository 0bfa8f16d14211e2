//! Vote extraction from free-form final-stage output.
//!
//! Accepted declaration conventions, tried in order:
//!
//! 1. **JSON**: an embedded object with a `"vote"` field
//!    (and optionally `"reasoning"`)
//! 2. **Labeled line**: `Vote: <identity>` and equivalents in both
//!    supported languages (see [`VOTE_LABELS`])
//! 3. **Emphasis markup**: an identity wrapped in `**…**` or `` `…` ``
//!
//! The first candidate identity found that is not the author's own wins.
//! Self-references and unknown names never produce a vote; when nothing
//! matches the result is an explicit undetected vote, never an error.

use crate::consensus::tally::Vote;
use crate::heuristics::lexicon::VOTE_LABELS;
use crate::persona::profile::{AgentId, PersonalityProfile};

const MIN_REASONING_CHARS: usize = 5;

/// Extract the declared vote from an agent's final output.
pub fn extract_vote(text: &str, author: &AgentId, candidates: &[PersonalityProfile]) -> Vote {
    if let Some(vote) = json_vote(text, author, candidates) {
        return vote;
    }
    if let Some(vote) = labeled_vote(text, author, candidates) {
        return vote;
    }
    if let Some(vote) = emphasized_vote(text, author, candidates) {
        return vote;
    }
    Vote::undetected(author.clone())
}

/// JSON declaration: the outermost `{…}` block with a `"vote"` field.
fn json_vote(text: &str, author: &AgentId, candidates: &[PersonalityProfile]) -> Option<Vote> {
    let start = text.find('{')?;
    let end = text[start..].rfind('}')?;
    let parsed: serde_json::Value = serde_json::from_str(&text[start..start + end + 1]).ok()?;

    let name = parsed.get("vote")?.as_str()?.trim().to_lowercase();
    let candidate = candidates
        .iter()
        .filter(|c| &c.id != author)
        .find(|c| c.match_names().iter().any(|n| *n == name))?;

    let mut vote = Vote::declared(author.clone(), candidate.id.clone());
    if let Some(reasoning) = parsed.get("reasoning").and_then(|v| v.as_str())
        && reasoning.trim().chars().count() > MIN_REASONING_CHARS
    {
        vote = vote.with_reasoning(reasoning.trim());
    }
    Some(vote)
}

/// Labeled declaration: the first line carrying a vote label that names a
/// non-self candidate. A trailing excerpt after the identity becomes the
/// reasoning.
fn labeled_vote(text: &str, author: &AgentId, candidates: &[PersonalityProfile]) -> Option<Vote> {
    for line in text.lines() {
        let lower = line.to_lowercase();
        for label in VOTE_LABELS {
            let Some(pos) = lower.find(label) else {
                continue;
            };
            let tail = &lower[pos + label.len()..];
            let Some((candidate, alias_start, alias_len)) =
                earliest_candidate(tail, author, candidates)
            else {
                continue;
            };

            let mut vote = Vote::declared(author.clone(), candidate);
            let excerpt_start = pos + label.len() + alias_start + alias_len;
            if let Some(excerpt) = excerpt_at(line, &lower, excerpt_start) {
                vote = vote.with_reasoning(excerpt);
            }
            return Some(vote);
        }
    }
    None
}

/// Emphasis declaration: the earliest `**name**` or `` `name` `` occurrence
/// of a non-self candidate anywhere in the text.
fn emphasized_vote(
    text: &str,
    author: &AgentId,
    candidates: &[PersonalityProfile],
) -> Option<Vote> {
    let lower = text.to_lowercase();
    let mut best: Option<(usize, AgentId)> = None;

    for candidate in candidates.iter().filter(|c| &c.id != author) {
        for name in candidate.match_names() {
            for wrapped in [format!("**{name}**"), format!("`{name}`")] {
                if let Some(pos) = lower.find(&wrapped)
                    && best.as_ref().is_none_or(|(b, _)| pos < *b)
                {
                    best = Some((pos, candidate.id.clone()));
                }
            }
        }
    }

    best.map(|(_, id)| Vote::declared(author.clone(), id))
}

/// Earliest match of any non-self candidate name in `haystack` (lowercase).
fn earliest_candidate(
    haystack: &str,
    author: &AgentId,
    candidates: &[PersonalityProfile],
) -> Option<(AgentId, usize, usize)> {
    let mut best: Option<(AgentId, usize, usize)> = None;
    for candidate in candidates.iter().filter(|c| &c.id != author) {
        for name in candidate.match_names() {
            if let Some(pos) = haystack.find(&name)
                && best.as_ref().is_none_or(|(_, b, _)| pos < *b)
            {
                best = Some((candidate.id.clone(), pos, name.len()));
            }
        }
    }
    best
}

/// Trailing excerpt starting at a byte offset computed on the lowered line.
/// Falls back to the lowered text when case-folding changed byte lengths.
fn excerpt_at(line: &str, lower: &str, start: usize) -> Option<String> {
    let raw = if line.len() == lower.len() {
        line.get(start..).unwrap_or("")
    } else {
        lower.get(start..).unwrap_or("")
    };
    let excerpt = raw
        .trim_start_matches(|c: char| {
            c.is_whitespace() || matches!(c, ',' | '.' | ':' | ';' | '-' | '—' | '、' | '。')
        })
        .trim();
    if excerpt.chars().count() > MIN_REASONING_CHARS {
        Some(excerpt.to_string())
    } else {
        None
    }
}
