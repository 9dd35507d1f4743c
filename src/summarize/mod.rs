pub mod extractive;
pub mod huggingface;

use crate::config::{SummarizerConfig, SummarizerProvider};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use extractive::ExtractiveSummarizer;
pub use huggingface::HuggingFaceSummarizer;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Condense `text` into a shorter summary.
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Short label for logs.
    fn name(&self) -> &str;
}

/// Pick the configured summarizer. `hf_token` is only used by the hosted provider.
pub fn build_summarizer(config: &SummarizerConfig, hf_token: Option<String>) -> Arc<dyn Summarizer> {
    match config.provider {
        SummarizerProvider::HuggingFace => {
            if hf_token.is_none() {
                tracing::warn!("HF_API_TOKEN not set; hosted summarization will be rate-limited");
            }
            Arc::new(HuggingFaceSummarizer::new(config, hf_token))
        }
        SummarizerProvider::Extractive => {
            Arc::new(ExtractiveSummarizer::new(config.max_length, config.min_length))
        }
    }
}
