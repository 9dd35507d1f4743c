use crate::config::FeedsConfig;
use crate::feed::FeedSource;
use crate::store::{lock_store, Article, ArticleStore};
use futures_util::future::join_all;
use std::sync::Mutex;

/// Fetch every configured feed and append the first `entries_per_feed` entries
/// of each to the store. Returns only the articles added by this call.
///
/// Feeds are fetched concurrently but ingested in configured order, so IDs
/// follow feed order. A feed that fails contributes nothing.
pub async fn fetch_news_articles(
    source: &dyn FeedSource,
    store: &Mutex<ArticleStore>,
    feeds: &FeedsConfig,
) -> Vec<Article> {
    let results = join_all(feeds.urls.iter().map(|url| source.fetch_entries(url))).await;

    let mut entries = Vec::new();
    for (url, result) in feeds.urls.iter().zip(results) {
        match result {
            Ok(feed_entries) => {
                let total = feed_entries.len();
                let kept: Vec<_> = feed_entries.into_iter().take(feeds.entries_per_feed).collect();
                tracing::debug!(feed = %url, total, kept = kept.len(), "feed fetched");
                entries.extend(kept);
            }
            Err(e) => {
                let error = format!("{:#}", e);
                tracing::warn!(feed = %url, error = %error, "feed fetch failed");
            }
        }
    }

    let added = lock_store(store).ingest(entries);
    tracing::info!(added = added.len(), feeds = feeds.urls.len(), "news fetched");
    added
}
