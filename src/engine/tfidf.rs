//! TF-IDF vectorization with smooth idf and L2 normalization.

use super::stop_words::is_stop_word;
use std::collections::BTreeMap;

/// Sparse document vector: `(term index, weight)` pairs sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Merge-walk both index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            if a_idx == b_idx {
                sum += a_w * b_w;
                i += 1;
                j += 1;
            } else if a_idx < b_idx {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    /// Cosine similarity; 0 when either side is the zero vector.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            0.0
        } else {
            self.dot(other) / denom
        }
    }
}

/// Lowercase, split on non-word characters, keep tokens of two or more chars
/// that are not stop words.
///
/// Word characters are `char::is_alphanumeric` plus `_`. That set includes the
/// alphabetic combining marks (Devanagari vowel signs, anusvara), so a word
/// like "हिंदी" stays one token instead of splitting at every mark.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|tok| tok.chars().count() >= 2 && !is_stop_word(tok))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Default)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Term -> column index, assigned in lexical order.
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Learn the vocabulary and idf weights from `docs`, then vectorize them.
    pub fn fit_transform<S: AsRef<str>>(&mut self, docs: &[S]) -> Vec<SparseVector> {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = docs.len() as f64;
        self.vocabulary.clear();
        self.idf.clear();
        for (idx, (term, df)) in doc_freq.iter().enumerate() {
            self.vocabulary.insert((*term).to_string(), idx);
            self.idf.push(((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0);
        }

        tokenized.iter().map(|tokens| self.vectorize(tokens)).collect()
    }

    /// Vectorize text against the fitted vocabulary. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorize(&tokenize(text))
    }

    fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for tok in tokens {
            if let Some(&idx) = self.vocabulary.get(tok) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }
        SparseVector { entries }
    }
}
