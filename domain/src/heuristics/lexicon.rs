//! Keyword tables for the text heuristics.
//!
//! Everything in this module is data. The matching logic lives in the
//! sibling modules and in `persona::params`; keeping the vocabularies here
//! means they can be tuned or swapped without touching any control flow.
//! All entries are lowercase; matchers lowercase their input before lookup.
//! Tables carry both supported languages (English and Japanese).

/// Vocabulary that signals a creative/expressive temperament.
/// Raises exploration and widens the candidate pool.
pub const CREATIVE_MARKERS: &[&str] = &[
    "creative",
    "imaginative",
    "playful",
    "expressive",
    "curious",
    "bold",
    "artistic",
    "free-spirited",
    "創造",
    "自由",
    "遊び心",
    "好奇心",
    "大胆",
];

/// Vocabulary that signals an analytical/precise temperament.
/// Lowers exploration and narrows the candidate pool.
pub const ANALYTICAL_MARKERS: &[&str] = &[
    "analytical",
    "precise",
    "rigorous",
    "systematic",
    "methodical",
    "exact",
    "logical",
    "分析",
    "厳密",
    "論理",
    "体系",
    "緻密",
];

/// Vocabulary that signals a gentle/warm temperament.
/// Nudges some knobs in the opposite direction from the analytical set.
pub const GENTLE_MARKERS: &[&str] = &[
    "gentle",
    "warm",
    "kind",
    "empathetic",
    "caring",
    "soft-spoken",
    "優しい",
    "温か",
    "柔らか",
    "思いやり",
];

/// Negative-sentiment and contrast vocabulary used when classifying
/// a reflection line as disagreement.
pub const NEGATIVE_MARKERS: &[&str] = &[
    "disagree",
    "however",
    "but ",
    "concern",
    "question",
    "doubt",
    "not ",
    "never",
    "flawed",
    "wrong",
    "unconvinc",
    "object",
    "反対",
    "しかし",
    "疑問",
    "懸念",
    "違う",
    "問題がある",
    "納得できない",
];

/// Positive-sentiment vocabulary used when classifying a reflection
/// line as agreement.
pub const POSITIVE_MARKERS: &[&str] = &[
    "agree",
    "good point",
    "well said",
    "exactly",
    "resonate",
    "convincing",
    "insightful",
    "valid",
    "compelling",
    "賛成",
    "同感",
    "同意",
    "その通り",
    "鋭い",
    "納得",
];

/// Labels that introduce an explicit vote declaration line.
pub const VOTE_LABELS: &[&str] = &[
    "vote:",
    "my vote:",
    "i vote for",
    "投票:",
    "投票：",
    "票:",
];

/// Reaction text recorded when an agent never mentions a peer.
pub const NO_ENGAGEMENT_REACTION: &str =
    "did not engage with this participant's thought";
