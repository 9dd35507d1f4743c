use super::types::FeedEntry;
use super::FeedSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("news-digest/", env!("CARGO_PKG_VERSION"));

pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(request_timeout_ms: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build reqwest client");
        Self { client }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>> {
        let resp = self.client.get(url).send().await
            .with_context(|| format!("feed request failed: {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("feed {} returned {}: {}", url, status, truncate(&body, 200));
        }

        let bytes = resp.bytes().await
            .with_context(|| format!("failed to read feed body: {}", url))?;
        parse_feed(&bytes).with_context(|| format!("failed to parse feed: {}", url))
    }
}

/// Parse an RSS 2.0 or Atom document. RSS is tried first.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>> {
    if let Ok(channel) = rss::Channel::read_from(bytes) {
        return Ok(parse_rss_channel(&channel));
    }
    match atom_syndication::Feed::read_from(bytes) {
        Ok(feed) => Ok(parse_atom_feed(&feed)),
        Err(e) => anyhow::bail!("document is neither RSS nor Atom: {}", e),
    }
}

fn parse_rss_channel(channel: &rss::Channel) -> Vec<FeedEntry> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = clean_text(item.title()?)?;
            let link = item.link()?.trim().to_string();
            if link.is_empty() {
                return None;
            }
            Some(FeedEntry {
                title,
                link,
                summary: item.description().and_then(clean_text),
            })
        })
        .collect()
}

fn parse_atom_feed(feed: &atom_syndication::Feed) -> Vec<FeedEntry> {
    feed.entries()
        .iter()
        .filter_map(|entry| {
            let title = clean_text(entry.title().value.as_str())?;
            // Prefer the alternate (HTML) link; fall back to whatever comes first.
            let link = entry
                .links()
                .iter()
                .find(|l| l.rel() == "alternate")
                .or_else(|| entry.links().first())
                .map(|l| l.href().trim().to_string())
                .filter(|href| !href.is_empty())?;
            let summary = entry
                .summary()
                .map(|s| s.value.as_str())
                .or_else(|| entry.content().and_then(|c| c.value()))
                .and_then(clean_text);
            Some(FeedEntry { title, link, summary })
        })
        .collect()
}

/// Strip markup and collapse whitespace; `None` when nothing readable remains.
fn clean_text(raw: &str) -> Option<String> {
    let text = strip_html(raw);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Strip HTML tags, decode entities and collapse whitespace.
pub fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // Tags separate words ("a<br>b" reads as "a b").
                result.push(' ');
            }
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    html_escape::decode_html_entities(&result)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
