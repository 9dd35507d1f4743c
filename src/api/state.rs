use crate::config::Config;
use crate::feed::FeedSource;
use crate::store::{lock_store, ArticleStore};
use crate::summarize::Summarizer;
use std::sync::{Arc, Mutex};

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<ArticleStore>>,
    pub feed_source: Arc<dyn FeedSource>,
    pub summarizer: Arc<dyn Summarizer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        config: Config,
        feed_source: Arc<dyn FeedSource>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(ArticleStore::new())),
            feed_source,
            summarizer,
            config: Arc::new(config),
        }
    }

    /// Run `f` with the store locked. The guard never outlives the call.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut ArticleStore) -> R) -> R {
        f(&mut lock_store(&self.store))
    }
}
