use crate::dictionary::SpellDictionary;
use crate::lemma::Lemmatizer;
use crate::segment::SentenceSegmenter;
use std::sync::Arc;

/// Default edit distance for spelling suggestions
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Language resources consumed by the normalizer and the spell corrector
///
/// Implementations must be deterministic: identical input always yields
/// identical output for the lifetime of the value.
pub trait LanguageModel: Send + Sync {
    /// Split text into trimmed sentences, preserving order
    fn segment(&self, text: &str) -> Vec<String>;

    /// Base form of a single lower-cased token
    fn lemmatize(&self, token: &str) -> String;

    /// Replacement for a misspelled word, or `None` to keep it as is
    fn correct(&self, word: &str) -> Option<String>;
}

/// Rule-based English resources: UAX #29 segmentation, suffix-rule
/// lemmatization and a frequency-ranked spelling dictionary.
#[derive(Debug, Clone)]
pub struct EnglishModel {
    segmenter: SentenceSegmenter,
    lemmatizer: Lemmatizer,
    dictionary: Arc<SpellDictionary>,
    max_edit_distance: usize,
}

impl EnglishModel {
    /// Model backed by the bundled English word list
    pub fn new() -> Self {
        Self {
            segmenter: SentenceSegmenter::new(),
            lemmatizer: Lemmatizer::english(),
            dictionary: SpellDictionary::shared_english(),
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
        }
    }

    /// Builder: replace the spelling dictionary
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: SpellDictionary) -> Self {
        self.dictionary = Arc::new(dictionary);
        self
    }

    /// Builder: set the maximum edit distance for corrections
    #[must_use]
    pub const fn with_max_edit_distance(mut self, distance: usize) -> Self {
        self.max_edit_distance = distance;
        self
    }

    pub fn dictionary(&self) -> &SpellDictionary {
        &self.dictionary
    }

    /// A word is known when the dictionary lists it or its lemma
    fn is_known(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.dictionary.contains(&lower)
            || self.dictionary.contains(&self.lemmatizer.lemmatize(&lower))
    }
}

impl Default for EnglishModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageModel for EnglishModel {
    fn segment(&self, text: &str) -> Vec<String> {
        self.segmenter.segment(text)
    }

    fn lemmatize(&self, token: &str) -> String {
        self.lemmatizer.lemmatize(token)
    }

    fn correct(&self, word: &str) -> Option<String> {
        let core = word.trim_matches(|c: char| !c.is_alphanumeric());
        if !is_checkable(core) || self.is_known(core) {
            return None;
        }
        let suggestion = self.dictionary.suggest(core, self.max_edit_distance)?;

        // Surrounding punctuation is kept around the replacement.
        let start = word.len() - word.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
        let (prefix, rest) = word.split_at(start);
        let suffix = &rest[core.len()..];
        Some(format!("{prefix}{}{suffix}", suggestion.word))
    }
}

/// Single characters, numbers and tokens without letters are never corrected.
fn is_checkable(word: &str) -> bool {
    word.chars().count() > 1
        && word.chars().any(char::is_alphabetic)
        && !word.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> EnglishModel {
        let dictionary =
            SpellDictionary::from_word_list("the\ncourt\nstatus\ncase\nhello\n").unwrap();
        EnglishModel::new().with_dictionary(dictionary)
    }

    #[test]
    fn known_words_are_kept() {
        assert_eq!(model().correct("court"), None);
        assert_eq!(model().correct("Court"), None);
    }

    #[test]
    fn misspellings_are_corrected_to_lowercase() {
        assert_eq!(model().correct("cuort").as_deref(), Some("court"));
        assert_eq!(model().correct("Stauts").as_deref(), Some("status"));
    }

    #[test]
    fn unreachable_words_are_kept() {
        assert_eq!(model().correct("xylophone"), None);
    }

    #[test]
    fn numbers_and_symbols_are_skipped() {
        assert_eq!(model().correct("2023"), None);
        assert_eq!(model().correct("a"), None);
        assert_eq!(model().correct("--"), None);
        assert_eq!(model().correct("3rd"), None);
    }

    #[test]
    fn inflections_of_known_words_are_kept() {
        let dictionary = SpellDictionary::from_word_list("court\nfile\ncase\n").unwrap();
        let model = EnglishModel::new().with_dictionary(dictionary);
        assert_eq!(model.correct("courts"), None);
        assert_eq!(model.correct("filed"), None);
        assert_eq!(model.correct("court's"), None);
        assert_eq!(model.correct("Cases"), None);
    }

    #[test]
    fn punctuation_around_a_word_is_preserved() {
        assert_eq!(model().correct("court?"), None);
        assert_eq!(model().correct("(cuort),").as_deref(), Some("(court),"));
        assert_eq!(model().correct("stauts?").as_deref(), Some("status?"));
    }

    #[test]
    fn bundled_dictionary_keeps_common_words() {
        let model = EnglishModel::new();
        for word in [
            "property", "tax", "refund", "passport", "income", "certificate", "consumer",
            "forum", "complaint", "marriage", "pension", "tribunal", "affidavit", "village",
        ] {
            assert_eq!(model.correct(word), None, "{word} should be known");
        }
        assert_eq!(model.correct("cuort").as_deref(), Some("court"));
        assert_eq!(model.correct("pasport").as_deref(), Some("passport"));
    }

    #[test]
    fn edit_distance_limit_is_configurable() {
        let strict = model().with_max_edit_distance(1);
        assert_eq!(strict.correct("stts"), None);
        assert_eq!(model().correct("stts").as_deref(), Some("status"));
    }
}
