use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/fetch-news", get(handlers::fetch_news))
        .route("/fetch-news/", get(handlers::fetch_news))
        .route("/summarize/{article_id}", get(handlers::summarize))
        .route("/recommend/{article_id}", get(handlers::recommend))
        .route("/articles", get(handlers::list_articles))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
