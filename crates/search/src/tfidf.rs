use ndarray::{Array1, Array2, ArrayView1};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Tokens are runs of two or more word characters.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// Term-frequency / inverse-document-frequency vector space
///
/// Uses raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1` and
/// L2-normalized rows.
#[derive(Debug, Clone)]
pub struct TfidfSpace {
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f64>,
}

impl TfidfSpace {
    /// Learn vocabulary and idf weights from `documents`
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tokenized: Vec<Vec<String>> = documents.into_iter().map(tokens).collect();

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in &tokenized {
            let mut seen: Vec<&String> = doc.iter().collect();
            seen.sort();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let n = tokenized.len() as f64;
        let vocabulary: BTreeMap<String, usize> = document_frequency
            .keys()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        let idf = document_frequency
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect::<Array1<f64>>();

        Self { vocabulary, idf }
    }

    /// Number of distinct terms
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// L2-normalized tf-idf vector of `text`; terms outside the vocabulary are ignored
    pub fn transform(&self, text: &str) -> Array1<f64> {
        let mut vector = Array1::<f64>::zeros(self.dimension());
        for term in tokens(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                vector[idx] += 1.0;
            }
        }
        vector *= &self.idf;

        let norm = vector.dot(&vector).sqrt();
        if norm > 0.0 {
            vector /= norm;
        }
        vector
    }

    /// One row per text
    pub fn transform_all<'a, I>(&self, texts: I) -> Array2<f64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let rows: Vec<Array1<f64>> = texts.into_iter().map(|t| self.transform(t)).collect();
        let mut matrix = Array2::<f64>::zeros((rows.len(), self.dimension()));
        for (mut row, vector) in matrix.rows_mut().into_iter().zip(rows) {
            row.assign(&vector);
        }
        matrix
    }
}

/// Cosine of the angle between two vectors; 0 when either is all zeros
pub fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let norms = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if norms == 0.0 {
        return 0.0;
    }
    a.dot(&b) / norms
}

fn tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
