use crate::types::SentenceMatch;
use answer_corpus::Corpus;

/// Score attached to exact containment matches
pub const EXACT_SCORE: f64 = 100.0;

/// Lemma substring containment
///
/// A sentence matches when its normalized text contains the normalized
/// query as a contiguous substring. An empty query matches every sentence,
/// so callers must not pass one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl ExactMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Matching sentences in corpus order
    pub fn find<'a>(&self, normalized_query: &str, corpus: &'a Corpus) -> Vec<SentenceMatch<'a>> {
        corpus
            .sentences()
            .iter()
            .enumerate()
            .filter(|(_, sentence)| sentence.normalized.contains(normalized_query))
            .map(|(index, sentence)| SentenceMatch {
                index,
                sentence,
                score: EXACT_SCORE,
            })
            .collect()
    }
}
