//! Content-based recommendations from TF-IDF cosine similarity.

use super::tfidf::{SparseVector, TfidfVectorizer};
use crate::store::Article;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Pairwise cosine similarity. Symmetric, with 1.0 on the diagonal for
/// non-empty documents and 0.0 wherever a zero vector is involved.
pub fn cosine_similarity_matrix(vectors: &[SparseVector]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let sim = vectors[i].cosine(&vectors[j]);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }
    matrix
}

/// Map each article id to the ids of its `count` most similar peers, best first.
///
/// Articles are compared on their summary text. An article is never its own
/// recommendation; equal scores go to the lower id. With fewer than two
/// articles there is nothing to compare and the map is empty.
pub fn compute_recommendations(articles: &[Article], count: usize) -> HashMap<u64, Vec<u64>> {
    let mut out = HashMap::new();
    if articles.len() < 2 {
        return out;
    }

    let matrix = cosine_similarity_matrix(&vectorize(articles));
    for (i, article) in articles.iter().enumerate() {
        out.insert(article.id, rank_row(articles, &matrix[i], i, count));
    }

    tracing::debug!(articles = articles.len(), count, "recommendations computed");
    out
}

/// Recommendations for a single article. Same ranking as
/// [`compute_recommendations`], but only the target's row is scored.
/// `None` when the id is unknown or there are fewer than two articles.
pub fn recommend_for(articles: &[Article], article_id: u64, count: usize) -> Option<Vec<u64>> {
    if articles.len() < 2 {
        return None;
    }
    let target = articles.iter().position(|a| a.id == article_id)?;

    let vectors = vectorize(articles);
    let row: Vec<f64> = vectors.iter().map(|v| vectors[target].cosine(v)).collect();
    Some(rank_row(articles, &row, target, count))
}

fn vectorize(articles: &[Article]) -> Vec<SparseVector> {
    let docs: Vec<&str> = articles.iter().map(|a| a.summary.as_str()).collect();
    TfidfVectorizer::new().fit_transform(&docs)
}

/// Rank every article but `target` by `row` score, descending, ties by lower id.
fn rank_row(articles: &[Article], row: &[f64], target: usize, count: usize) -> Vec<u64> {
    let mut ranked: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(j, _)| j != target)
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| articles[a.0].id.cmp(&articles[b.0].id))
    });
    ranked.iter().take(count).map(|&(j, _)| articles[j].id).collect()
}
