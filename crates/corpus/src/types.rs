use answer_language::{tokenize, Normalizer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of the input table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Ordinal position in the table (0-indexed)
    pub id: usize,

    /// Document text; missing cells are stored as an empty string
    pub raw_text: String,
}

impl Document {
    pub fn new(id: usize, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            raw_text: raw_text.into(),
        }
    }

    /// Build a document from a possibly missing field
    pub fn from_field(id: usize, field: Option<&str>) -> Self {
        Self::new(id, field.unwrap_or_default())
    }
}

/// A unit of retrieval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sentence {
    /// Trimmed original text
    pub raw: String,

    /// Lower-cased, lemmatized form used for matching
    pub normalized: String,

    /// Id of the owning document
    pub document_id: usize,
}

/// Ordered sentences of every document, in document order
///
/// Built once per loaded table and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sentences: Vec<Sentence>,
    document_count: usize,
    vocabulary: HashSet<String>,
}

impl Corpus {
    /// Segment and normalize every document
    pub fn build(documents: &[Document], normalizer: &Normalizer) -> Self {
        let mut sentences = Vec::new();
        let mut vocabulary = HashSet::new();

        for document in documents {
            vocabulary.extend(tokenize(&document.raw_text.to_lowercase()).map(str::to_string));

            for raw in normalizer.segment(&document.raw_text) {
                let normalized = normalizer.normalize(&raw);
                sentences.push(Sentence {
                    raw,
                    normalized,
                    document_id: document.id,
                });
            }
        }

        log::info!(
            "Indexed {} sentences from {} documents",
            sentences.len(),
            documents.len()
        );

        Self {
            sentences,
            document_count: documents.len(),
            vocabulary,
        }
    }

    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Sentence> {
        self.sentences.get(idx)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    #[must_use]
    pub const fn document_count(&self) -> usize {
        self.document_count
    }

    /// Whether `word` (case-insensitive) occurs anywhere in the source text
    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.vocabulary.contains(&word.to_lowercase())
    }
}
