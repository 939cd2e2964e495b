use crate::model::{EnglishModel, LanguageModel};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}+$").expect("valid regex"));

/// Sentence segmentation and lemmatized normal form of text
#[derive(Clone)]
pub struct Normalizer {
    model: Arc<dyn LanguageModel>,
}

impl Normalizer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Normalizer backed by the bundled English model
    pub fn english() -> Self {
        Self::new(Arc::new(EnglishModel::new()))
    }

    /// Trimmed sentences of `text` in order
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.model.segment(text)
    }

    /// Lower-case, drop punctuation and whitespace tokens, lemmatize the
    /// rest and join with single spaces
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        tokenize(&lowered)
            .map(|token| self.model.lemmatize(token))
            .filter(|lemma| !lemma.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn model(&self) -> &Arc<dyn LanguageModel> {
        &self.model
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

/// Word tokens of `text`, without whitespace or pure-punctuation tokens
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_word_bounds()
        .filter(|token| !token.trim().is_empty() && !PUNCTUATION.is_match(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn normalizes_sentence() {
        let normalizer = Normalizer::english();
        assert_eq!(
            normalizer.normalize("The cat sat on the mat."),
            "the cat sit on the mat"
        );
        assert_eq!(
            normalizer.normalize("  Running CASES, filed   in courts!  "),
            "run case file in court"
        );
    }

    #[test]
    fn drops_punctuation_but_keeps_numbers_and_symbols() {
        let normalizer = Normalizer::english();
        assert_eq!(normalizer.normalize("Fee: $ 3.50 -- paid?"), "fee $ 3.50 pay");
        assert_eq!(normalizer.normalize("?!..."), "");
        assert_eq!(normalizer.normalize(""), "");
    }

    #[test]
    fn tokenize_splits_on_word_boundaries() {
        let tokens: Vec<_> = tokenize("hello, world! it's 9.5").collect();
        assert_eq!(tokens, vec!["hello", "world", "it's", "9.5"]);
    }

    #[test]
    fn segment_delegates_to_model() {
        let normalizer = Normalizer::english();
        assert_eq!(
            normalizer.segment("One sentence. Two sentences."),
            vec!["One sentence.", "Two sentences."]
        );
    }

    proptest! {
        #[test]
        fn proptest_normalize_is_idempotent(text in "[A-Za-z ,.!?']{0,60}") {
            let normalizer = Normalizer::english();
            let once = normalizer.normalize(&text);
            prop_assert_eq!(normalizer.normalize(&once), once);
        }
    }
}
