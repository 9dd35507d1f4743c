pub mod similarity;
pub mod stop_words;
pub mod tfidf;

pub use similarity::{compute_recommendations, cosine_similarity_matrix, recommend_for};
pub use tfidf::{SparseVector, TfidfVectorizer};
