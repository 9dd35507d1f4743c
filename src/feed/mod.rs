pub mod rss_client;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use types::FeedEntry;

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch one feed and return its entries in document order.
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>>;
}
