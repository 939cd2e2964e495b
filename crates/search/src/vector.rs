use crate::config::VectorText;
use crate::tfidf::{cosine_similarity, TfidfSpace};
use crate::types::SentenceMatch;
use answer_corpus::Corpus;

/// Default cosine similarity the best sentence must exceed
pub const DEFAULT_VECTOR_THRESHOLD: f64 = 0.15;

/// TF-IDF cosine fallback
///
/// The vector space is fitted per query over every sentence plus the query
/// itself, so its vocabulary and idf weights depend on both.
#[derive(Debug, Clone, Copy)]
pub struct VectorMatcher {
    threshold: f64,
    text: VectorText,
}

impl VectorMatcher {
    pub fn new(threshold: f64, text: VectorText) -> Self {
        Self { threshold, text }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Single most similar sentence, if its similarity is strictly above
    /// the threshold. Ties go to the earliest sentence.
    pub fn find<'a>(&self, normalized_query: &str, corpus: &'a Corpus) -> Option<SentenceMatch<'a>> {
        if corpus.is_empty() {
            return None;
        }

        let texts: Vec<&str> = corpus
            .sentences()
            .iter()
            .map(|s| match self.text {
                VectorText::Raw => s.raw.as_str(),
                VectorText::Normalized => s.normalized.as_str(),
            })
            .collect();

        let space = TfidfSpace::fit(texts.iter().copied().chain(std::iter::once(normalized_query)));
        let matrix = space.transform_all(texts.iter().copied());
        let query = space.transform(normalized_query);

        let mut best: Option<(usize, f64)> = None;
        for (index, row) in matrix.rows().into_iter().enumerate() {
            let score = cosine_similarity(query.view(), row);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        let (index, score) = best?;
        log::debug!("Vector: best sentence {index} with similarity {score:.4}");

        if score > self.threshold {
            corpus.get(index).map(|sentence| SentenceMatch {
                index,
                sentence,
                score,
            })
        } else {
            None
        }
    }
}

impl Default for VectorMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_VECTOR_THRESHOLD, VectorText::Raw)
    }
}
