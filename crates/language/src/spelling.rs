use crate::model::{EnglishModel, LanguageModel};
use std::sync::Arc;

/// Word-by-word spelling correction
///
/// The output always has as many whitespace-separated tokens as the input;
/// a token is only replaced when the language model proposes a correction.
#[derive(Clone)]
pub struct SpellCorrector {
    model: Arc<dyn LanguageModel>,
}

impl SpellCorrector {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Corrector backed by the bundled English model
    pub fn english() -> Self {
        Self::new(Arc::new(EnglishModel::new()))
    }

    pub fn correct(&self, text: &str) -> String {
        self.correct_protected(text, |_| false)
    }

    /// Correct `text`, leaving alone every token for which `is_protected`
    /// returns true (it receives the lower-cased token)
    pub fn correct_protected<F>(&self, text: &str, is_protected: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        text.split_whitespace()
            .map(|word| {
                if is_protected(&word.to_lowercase()) {
                    return word.to_string();
                }
                match self.model.correct(word) {
                    Some(corrected) => {
                        log::debug!("Spelling: '{word}' -> '{corrected}'");
                        corrected
                    }
                    None => word.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Debug for SpellCorrector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpellCorrector").finish_non_exhaustive()
    }
}
