use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::aggregator::fetch_news_articles;
use crate::engine::recommend_for;
use crate::store::Article;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub article_title: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendedArticle {
    pub id: u64,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommended_articles: Vec<RecommendedArticle>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub articles: usize,
    /// When feeds were last ingested; `null` before the first fetch.
    pub last_fetch: Option<DateTime<Utc>>,
}

/// Fetch all configured feeds and return the articles added by this call.
pub async fn fetch_news(State(state): State<AppState>) -> Json<ArticlesResponse> {
    let articles =
        fetch_news_articles(state.feed_source.as_ref(), &state.store, &state.config.feeds).await;
    Json(ArticlesResponse { articles })
}

/// Summarize one stored article. Results are cached per article.
pub async fn summarize(
    State(state): State<AppState>,
    Path(article_id): Path<u64>,
) -> ApiResult<Json<SummaryResponse>> {
    let (article, cached) = state.with_store(|store| {
        let article = store.get(article_id).cloned();
        let cached = store.cached_summary(article_id).map(str::to_string);
        (article, cached)
    });
    let article = article.ok_or(ApiError::ArticleNotFound)?;

    let summary = match cached {
        Some(summary) => summary,
        None => {
            let summary = state
                .summarizer
                .summarize(&article.summary)
                .await
                .map_err(|e| ApiError::Summarization(format!("{:#}", e)))?;
            tracing::info!(
                article_id,
                summarizer = state.summarizer.name(),
                words = summary.split_whitespace().count(),
                "article summarized"
            );
            state.with_store(|store| store.cache_summary(article_id, summary.clone()));
            summary
        }
    };

    Ok(Json(SummaryResponse {
        article_title: article.title,
        summary,
    }))
}

/// Recommend the articles most similar to `article_id`, best first.
pub async fn recommend(
    State(state): State<AppState>,
    Path(article_id): Path<u64>,
) -> ApiResult<Json<RecommendResponse>> {
    let articles = state.with_store(|store| store.all().to_vec());
    let ids = recommend_for(&articles, article_id, state.config.recommender.count)
        .ok_or(ApiError::NoRecommendations)?;

    let recommended_articles = ids
        .iter()
        .filter_map(|&id| articles.iter().find(|a| a.id == id))
        .map(|a| RecommendedArticle {
            id: a.id,
            title: a.title.clone(),
            link: a.link.clone(),
        })
        .collect();
    Ok(Json(RecommendResponse { recommended_articles }))
}

/// Every stored article, without fetching.
pub async fn list_articles(State(state): State<AppState>) -> Json<ArticlesResponse> {
    let articles = state.with_store(|store| store.all().to_vec());
    Json(ArticlesResponse { articles })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (articles, last_fetch) = state.with_store(|store| (store.len(), store.last_fetch()));
    Json(HealthResponse {
        status: "ok",
        articles,
        last_fetch,
    })
}
