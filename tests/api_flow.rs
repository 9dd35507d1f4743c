//! End-to-end HTTP flow against the router with in-memory feed and summarizer stubs.

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use news_digest::api::{create_router, AppState};
use news_digest::config::Config;
use news_digest::feed::types::FeedEntry;
use news_digest::feed::FeedSource;
use news_digest::summarize::{ExtractiveSummarizer, Summarizer};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

struct StubFeeds;

#[async_trait]
impl FeedSource for StubFeeds {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>> {
        let entry = |title: &str, slug: &str, summary: Option<&str>| FeedEntry {
            title: title.to_string(),
            link: format!("{}/{}", url, slug),
            summary: summary.map(str::to_string),
        };
        match url {
            "https://world.test/rss" => Ok(vec![
                entry("Floods", "floods", Some("Heavy rain floods coastal towns")),
                entry("Rates", "rates", Some("Central bank raises rates")),
                entry("Extra", "extra", Some("Never taken: past the per-feed limit")),
            ]),
            "https://more.test/rss" => Ok(vec![
                entry("More floods", "more-floods", Some("Coastal towns brace for more floods")),
                entry("Untitled summary", "none", None),
            ]),
            _ => anyhow::bail!("unreachable feed"),
        }
    }
}

/// Counts calls and fails on demand.
struct CountingSummarizer {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl Summarizer for CountingSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("inference endpoint returned 503");
        }
        Ok(format!("short: {}", text))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn config() -> Config {
    let mut config = Config::default();
    config.feeds.urls = vec![
        "https://world.test/rss".to_string(),
        "https://down.test/rss".to_string(),
        "https://more.test/rss".to_string(),
    ];
    config.feeds.entries_per_feed = 2;
    config.recommender.count = 2;
    config
}

fn app_with(summarizer: Arc<dyn Summarizer>) -> (Router, AppState) {
    let state = AppState::new(config(), Arc::new(StubFeeds), summarizer);
    (create_router(state.clone()), state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_fetch_news_assigns_ids_in_feed_order() {
    let (app, _) = app_with(Arc::new(ExtractiveSummarizer::new(150, 50)));

    let (status, body) = get(&app, "/fetch-news/").await;
    assert_eq!(status, StatusCode::OK);
    let articles = body["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 4);
    assert_eq!(
        articles[0],
        json!({
            "id": 0,
            "title": "Floods",
            "link": "https://world.test/rss/floods",
            "summary": "Heavy rain floods coastal towns"
        })
    );
    assert_eq!(articles[2]["title"], "More floods");
    assert_eq!(articles[3]["summary"], "No summary available");

    // No trailing slash works too; refetching appends with fresh ids.
    let (status, body) = get(&app, "/fetch-news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articles"][0]["id"], 4);

    let (_, body) = get(&app, "/articles").await;
    assert_eq!(body["articles"].as_array().unwrap().len(), 8);

    let (_, body) = get(&app, "/health").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["articles"], 8);
    let last_fetch = body["last_fetch"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(last_fetch).is_ok());
}

#[tokio::test]
async fn test_health_before_first_fetch() {
    let (app, _) = app_with(Arc::new(ExtractiveSummarizer::new(150, 50)));
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "articles": 0, "last_fetch": null}));
}

#[tokio::test]
async fn test_summarize_caches_result() {
    let summarizer = Arc::new(CountingSummarizer { calls: AtomicUsize::new(0), fail: false });
    let (app, _) = app_with(summarizer.clone());
    get(&app, "/fetch-news/").await;

    let (status, body) = get(&app, "/summarize/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"article_title": "Rates", "summary": "short: Central bank raises rates"})
    );

    let (status, _) = get(&app, "/summarize/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_summarize_errors() {
    let (app, _) = app_with(Arc::new(CountingSummarizer { calls: AtomicUsize::new(0), fail: true }));

    let (status, body) = get(&app, "/summarize/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Article not found!"}));

    get(&app, "/fetch-news/").await;
    let (status, body) = get(&app, "/summarize/0").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().starts_with("Summarization failed:"));

    let (status, _) = get(&app, "/summarize/not-a-number").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_flow() {
    let (app, _) = app_with(Arc::new(ExtractiveSummarizer::new(150, 50)));

    let (status, body) = get(&app, "/recommend/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "Article not found or not enough data for recommendations."})
    );

    get(&app, "/fetch-news/").await;

    let (status, body) = get(&app, "/recommend/0").await;
    assert_eq!(status, StatusCode::OK);
    let recs = body["recommended_articles"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(
        recs[0],
        json!({"id": 2, "title": "More floods", "link": "https://more.test/rss/more-floods"})
    );
    assert!(recs.iter().all(|r| r["id"] != 0));

    let (status, _) = get(&app, "/recommend/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_single_article_has_no_recommendations() {
    let mut cfg = config();
    cfg.feeds.urls = vec!["https://world.test/rss".to_string()];
    cfg.feeds.entries_per_feed = 1;
    let state = AppState::new(cfg, Arc::new(StubFeeds), Arc::new(ExtractiveSummarizer::new(150, 50)));
    let app = create_router(state);

    get(&app, "/fetch-news/").await;
    let (status, _) = get(&app, "/recommend/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
