use crate::error::{LanguageError, Result};
use once_cell::sync::Lazy;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const BUILTIN_ENGLISH: &str = include_str!("../assets/words_en.txt");

// The bundled list is validated by tests; a parse failure here is a build defect.
static ENGLISH: Lazy<Arc<SpellDictionary>> =
    Lazy::new(|| Arc::new(SpellDictionary::from_word_list(BUILTIN_ENGLISH).unwrap_or_default()));

/// A correction candidate chosen from the dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word: String,
    pub distance: usize,
    pub frequency: u64,
}

/// Frequency-ranked word list used for spelling correction
///
/// Words are stored lower-cased. Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct SpellDictionary {
    words: HashMap<String, u64>,
}

impl SpellDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled English word list
    pub fn english() -> Self {
        Self::clone(&ENGLISH)
    }

    /// The bundled English word list, parsed once per process
    pub(crate) fn shared_english() -> Arc<Self> {
        Arc::clone(&ENGLISH)
    }

    /// Parse a word list
    ///
    /// One entry per line, either `word` or `word count`. Entries without a
    /// count are ranked by position: earlier lines are more frequent. Blank
    /// lines and lines starting with `#` are skipped.
    pub fn from_word_list(text: &str) -> Result<Self> {
        let entries: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let total = entries.len() as u64;
        let mut dictionary = Self::new();
        for (rank, (line_no, line)) in entries.into_iter().enumerate() {
            let mut fields = line.split_whitespace();
            let word = fields
                .next()
                .ok_or_else(|| LanguageError::invalid_dictionary(line_no, "missing word"))?;
            let frequency = match fields.next() {
                Some(raw) => raw.parse::<u64>().map_err(|_| {
                    LanguageError::invalid_dictionary(line_no, format!("invalid count '{raw}'"))
                })?,
                None => total - rank as u64,
            };
            if fields.next().is_some() {
                return Err(LanguageError::invalid_dictionary(
                    line_no,
                    "expected 'word' or 'word count'",
                ));
            }
            dictionary.insert(word, frequency);
        }

        log::debug!("Loaded spelling dictionary with {} words", dictionary.len());
        Ok(dictionary)
    }

    /// Load a word list from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_word_list(&text)
    }

    /// Add a word, keeping the higher frequency if it already exists
    pub fn insert(&mut self, word: &str, frequency: u64) {
        let entry = self.words.entry(word.to_lowercase()).or_insert(0);
        *entry = (*entry).max(frequency);
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    #[must_use]
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Best correction for `word` within `max_distance` edits
    ///
    /// Candidates are ordered by edit distance, then frequency (higher first),
    /// then alphabetically, so the result does not depend on map iteration order.
    pub fn suggest(&self, word: &str, max_distance: usize) -> Option<Suggestion> {
        let target: Vec<char> = word.to_lowercase().chars().collect();

        self.words
            .iter()
            .filter(|(candidate, _)| {
                candidate.chars().count().abs_diff(target.len()) <= max_distance
            })
            .filter_map(|(candidate, &frequency)| {
                let candidate_chars: Vec<char> = candidate.chars().collect();
                let distance = osa_distance(&target, &candidate_chars);
                (distance <= max_distance).then(|| Suggestion {
                    word: candidate.clone(),
                    distance,
                    frequency,
                })
            })
            .min_by(|a, b| {
                (a.distance, Reverse(a.frequency), &a.word)
                    .cmp(&(b.distance, Reverse(b.frequency), &b.word))
            })
    }
}

/// Optimal string alignment distance (Levenshtein plus adjacent transpositions)
pub(crate) fn osa_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let width = b.len() + 1;
    let mut table = vec![0usize; (a.len() + 1) * width];
    for i in 0..=a.len() {
        table[i * width] = i;
    }
    for j in 0..=b.len() {
        table[j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (table[(i - 1) * width + j] + 1)
                .min(table[i * width + j - 1] + 1)
                .min(table[(i - 1) * width + j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(table[(i - 2) * width + j - 2] + 1);
            }
            table[i * width + j] = best;
        }
    }

    table[a.len() * width + b.len()]
}
