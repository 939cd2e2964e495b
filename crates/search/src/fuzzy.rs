use crate::types::SentenceMatch;
use answer_corpus::Corpus;

/// Default inclusive cutoff for fuzzy matches
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 90;

/// Fuzzy sentence search using partial similarity
pub struct FuzzyMatcher {
    threshold: u8,
}

impl FuzzyMatcher {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Score every sentence against the query and keep those at or above
    /// the threshold.
    /// Returns matches sorted by score descending; equal scores keep corpus order
    pub fn find<'a>(&self, normalized_query: &str, corpus: &'a Corpus) -> Vec<SentenceMatch<'a>> {
        let mut scored: Vec<SentenceMatch<'a>> = corpus
            .sentences()
            .iter()
            .enumerate()
            .filter_map(|(index, sentence)| {
                let score = partial_ratio(normalized_query, &sentence.normalized);
                (score >= self.threshold).then_some(SentenceMatch {
                    index,
                    sentence,
                    score: f64::from(score),
                })
            })
            .collect();

        // Stable sort keeps corpus order among ties
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        log::debug!(
            "Fuzzy: {} sentences at or above {}",
            scored.len(),
            self.threshold
        );
        scored
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

/// Similarity (0-100) between the shorter string and its best-aligned
/// window of the longer one.
///
/// Each window has the length of the shorter string; its similarity is the
/// normalized Indel similarity `2 * lcs / (len_a + len_b)`. A shorter string
/// contained verbatim in the longer one scores 100. Either side empty scores 0.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() {
        return 0;
    }

    let width = shorter.len();
    let mut best = 0.0f64;
    for start in 0..=(longer.len() - width) {
        let window = &longer[start..start + width];
        let similarity = 2.0 * lcs_len(&shorter, window) as f64 / (2 * width) as f64;
        if similarity > best {
            best = similarity;
            if best >= 1.0 {
                break;
            }
        }
    }

    (best * 100.0).round() as u8
}

/// Length of the longest common subsequence.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
