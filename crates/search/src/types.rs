use answer_corpus::Sentence;
use serde::{Deserialize, Serialize};

/// Matcher that produced a result
///
/// Score scales differ per tier: exact matches carry 100, fuzzy matches
/// their partial-similarity score (0-100), vector matches their cosine
/// similarity (0-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Fuzzy,
    Vector,
}

impl MatchTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Vector => "vector",
        }
    }
}

/// A corpus sentence selected by a matcher
#[derive(Debug, Clone, Copy)]
pub struct SentenceMatch<'a> {
    /// Position of the sentence in the corpus
    pub index: usize,
    pub sentence: &'a Sentence,
    pub score: f64,
}
