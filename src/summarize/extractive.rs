//! Offline sentence-ranking summarizer.

use super::Summarizer;
use crate::engine::TfidfVectorizer;
use anyhow::Result;
use async_trait::async_trait;
use std::cmp::Ordering;

pub struct ExtractiveSummarizer {
    max_words: usize,
    min_words: usize,
}

impl ExtractiveSummarizer {
    pub fn new(max_words: usize, min_words: usize) -> Self {
        Self { max_words, min_words }
    }

    /// Keep the sentences closest to the text's TF-IDF centroid, in original
    /// order, up to `max_words` words.
    pub fn summarize_text(&self, text: &str) -> String {
        let text = text.trim();
        if word_count(text) <= self.min_words {
            return text.to_string();
        }

        let sentences = split_sentences(text);
        let vectors = TfidfVectorizer::new().fit_transform(&sentences);

        let dims = vectors
            .iter()
            .flat_map(|v| v.entries().iter().map(|(idx, _)| idx + 1))
            .max()
            .unwrap_or(0);
        let mut centroid = vec![0.0; dims];
        for v in &vectors {
            for &(idx, w) in v.entries() {
                centroid[idx] += w / vectors.len() as f64;
            }
        }

        let mut ranked: Vec<(usize, f64)> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, v.entries().iter().map(|&(idx, w)| w * centroid[idx]).sum()))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));

        let mut chosen = Vec::new();
        let mut words = 0;
        for &(i, _) in &ranked {
            let n = word_count(sentences[i]);
            if words + n <= self.max_words {
                chosen.push(i);
                words += n;
            }
        }

        if chosen.is_empty() {
            // Best sentence alone is too long: cut it.
            let best = ranked.first().map(|&(i, _)| sentences[i]).unwrap_or(text);
            return best.split_whitespace().take(self.max_words).collect::<Vec<_>>().join(" ");
        }

        chosen.sort_unstable();
        chosen.iter().map(|&i| sentences[i]).collect::<Vec<_>>().join(" ")
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        Ok(self.summarize_text(text))
    }

    fn name(&self) -> &str {
        "extractive"
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split after `.`, `!` or `?` when followed by whitespace or end of text.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
            if at_boundary {
                let end = i + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    out.push(sentence);
                }
                start = end;
            }
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Heavy rain flooded the river valley overnight. \
        Rescue crews evacuated residents from flooded homes in the valley. \
        The local football team won on Saturday. \
        Officials said the river flooding could worsen as more rain falls.";

    #[test]
    fn test_split_sentences() {
        let s = split_sentences("First one. Second? Third! Growth was 3.5 percent. tail");
        assert_eq!(s, vec!["First one.", "Second?", "Third!", "Growth was 3.5 percent.", "tail"]);
    }

    #[test]
    fn test_short_text_returned_unchanged() {
        let s = ExtractiveSummarizer::new(150, 50);
        assert_eq!(s.summarize_text("  Only a few words here.  "), "Only a few words here.");
    }

    #[test]
    fn test_drops_off_topic_sentence() {
        let s = ExtractiveSummarizer::new(30, 5);
        let summary = s.summarize_text(TEXT);
        assert!(!summary.contains("football"));
        assert!(summary.starts_with("Heavy rain flooded"));
        assert!(word_count(&summary) <= 30);
    }

    #[test]
    fn test_keeps_original_order() {
        let s = ExtractiveSummarizer::new(100, 5);
        assert_eq!(s.summarize_text(TEXT), split_sentences(TEXT).join(" "));
    }

    #[test]
    fn test_single_long_sentence_is_cut() {
        let s = ExtractiveSummarizer::new(4, 2);
        assert_eq!(s.summarize_text("one two three four five six seven"), "one two three four");
    }

    #[tokio::test]
    async fn test_trait_impl() {
        let s = ExtractiveSummarizer::new(10, 3);
        assert_eq!(s.summarize("Tiny text.").await.unwrap(), "Tiny text.");
    }
}
