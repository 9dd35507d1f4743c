use crate::feed::types::FeedEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

pub const NO_SUMMARY: &str = "No summary available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub link: String,
    pub summary: String,
}

/// In-memory article list. IDs are dense and equal to the article's position.
pub struct ArticleStore {
    articles: Vec<Article>,
    summaries: HashMap<u64, String>,
    last_fetch: Option<DateTime<Utc>>,
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleStore {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            summaries: HashMap::new(),
            last_fetch: None,
        }
    }

    /// Append entries as new articles and return them. Nothing is deduplicated:
    /// the same link fetched twice is stored twice under different IDs.
    pub fn ingest(&mut self, entries: Vec<FeedEntry>) -> Vec<Article> {
        let first_id = self.articles.len() as u64;
        let added: Vec<Article> = entries
            .into_iter()
            .enumerate()
            .map(|(offset, entry)| Article {
                id: first_id + offset as u64,
                title: entry.title,
                link: entry.link,
                summary: entry.summary.unwrap_or_else(|| NO_SUMMARY.to_string()),
            })
            .collect();
        self.articles.extend(added.iter().cloned());
        self.last_fetch = Some(Utc::now());
        added
    }

    pub fn get(&self, id: u64) -> Option<&Article> {
        usize::try_from(id).ok().and_then(|idx| self.articles.get(idx))
    }

    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.last_fetch
    }

    pub fn cached_summary(&self, id: u64) -> Option<&str> {
        self.summaries.get(&id).map(String::as_str)
    }

    pub fn cache_summary(&mut self, id: u64, summary: String) {
        self.summaries.insert(id, summary);
    }
}

/// Lock a shared store. A poisoned lock is recovered: the store holds plain
/// data and stays usable after a panicking holder.
pub fn lock_store(store: &Mutex<ArticleStore>) -> MutexGuard<'_, ArticleStore> {
    match store.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
