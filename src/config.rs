use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

const ENV_FILE: &str = ".env";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub recommender: RecommenderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedsConfig {
    #[serde(default = "default_feed_urls")]
    pub urls: Vec<String>,
    #[serde(default = "default_entries_per_feed")]
    pub entries_per_feed: usize,
    #[serde(default = "default_feed_timeout")]
    pub request_timeout_ms: u64,
    /// Background refresh period. Absent means articles are only fetched on request.
    pub refresh_interval_s: Option<u64>,
}

fn default_feed_urls() -> Vec<String> {
    vec![
        "https://rss.nytimes.com/services/xml/rss/nyt/World.xml".to_string(),
        "http://feeds.bbci.co.uk/news/world/rss.xml".to_string(),
        "https://www.aljazeera.com/xml/rss/all.xml".to_string(),
    ]
}
fn default_entries_per_feed() -> usize { 5 }
fn default_feed_timeout() -> u64 { 10_000 }

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            urls: default_feed_urls(),
            entries_per_feed: default_entries_per_feed(),
            request_timeout_ms: default_feed_timeout(),
            refresh_interval_s: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerProvider {
    #[default]
    #[serde(alias = "hf")]
    HuggingFace,
    Extractive,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SummarizerConfig {
    #[serde(default)]
    pub provider: SummarizerProvider,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default)]
    pub do_sample: bool,
    /// Ask the hosted endpoint to block while a cold model loads instead of answering 503.
    #[serde(default = "default_wait_for_model")]
    pub wait_for_model: bool,
    #[serde(default = "default_summarizer_timeout")]
    pub request_timeout_ms: u64,
}

fn default_model() -> String {
    "facebook/bart-large-cnn".to_string()
}
fn default_api_base() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}
fn default_max_length() -> usize { 150 }
fn default_min_length() -> usize { 50 }
fn default_wait_for_model() -> bool { true }
fn default_summarizer_timeout() -> u64 { 60_000 }

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: SummarizerProvider::default(),
            model: default_model(),
            api_base: default_api_base(),
            max_length: default_max_length(),
            min_length: default_min_length(),
            do_sample: false,
            wait_for_model: default_wait_for_model(),
            request_timeout_ms: default_summarizer_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommenderConfig {
    /// How many similar articles to return per article.
    #[serde(default = "default_recommend_count")]
    pub count: usize,
}

fn default_recommend_count() -> usize { 2 }

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self { count: default_recommend_count() }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| "Failed to parse config TOML")?;
        if config.summarizer.min_length > config.summarizer.max_length {
            anyhow::bail!(
                "summarizer.min_length ({}) exceeds summarizer.max_length ({})",
                config.summarizer.min_length,
                config.summarizer.max_length
            );
        }
        Ok(config)
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        let path = Path::new(ENV_FILE);
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return,
        };
        // Strip BOM if present (common on Windows-created files)
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        for (key, value) in parse_env_lines(content) {
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }

    /// Hosted inference token. Optional: the endpoint also serves anonymous, rate-limited requests.
    pub fn hf_api_token() -> Option<String> {
        match std::env::var("HF_API_TOKEN") {
            Ok(token) if !token.trim().is_empty() => Some(sanitize_key(&token)),
            _ => None,
        }
    }
}

fn parse_env_lines(content: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    for line in content.lines() {
        let line = line.trim().trim_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            out.push((key, value));
        }
    }
    out
}

/// Strip carriage returns, BOM, and other invisible chars from a key value.
fn sanitize_key(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}
