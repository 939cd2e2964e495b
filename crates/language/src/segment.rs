use unicode_segmentation::UnicodeSegmentation;

/// Abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "no.", "nos.", "vs.", "v.",
    "e.g.", "i.e.", "fig.", "approx.", "dept.", "govt.", "hon.", "adv.", "sec.", "art.",
    "cf.", "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.",
    "nov.", "dec.",
];

/// Sentence boundary detection based on Unicode UAX #29
///
/// The raw UAX #29 boundaries are repaired afterwards: a boundary that
/// directly follows a known abbreviation ("Dr.", "No.", "e.g.") is dropped
/// so the abbreviation stays attached to the sentence it belongs to.
#[derive(Debug, Clone, Default)]
pub struct SentenceSegmenter;

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Split `text` into trimmed, non-empty sentences in document order
    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut spans: Vec<(usize, usize)> = Vec::new();

        for (start, piece) in text.split_sentence_bound_indices() {
            let end = start + piece.len();
            match spans.last_mut() {
                Some(last) if ends_with_abbreviation(&text[last.0..last.1]) => last.1 = end,
                _ => spans.push((start, end)),
            }
        }

        spans
            .into_iter()
            .map(|(start, end)| text[start..end].trim())
            .filter(|sentence| !sentence.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn ends_with_abbreviation(span: &str) -> bool {
    let Some(last_word) = span.split_whitespace().last() else {
        return false;
    };
    let lowered = last_word
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    ABBREVIATIONS.contains(&lowered.as_str())
}
