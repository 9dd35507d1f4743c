use super::Summarizer;
use crate::config::SummarizerConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hosted inference API client for a seq2seq summarization model.
pub struct HuggingFaceSummarizer {
    client: Client,
    endpoint: String,
    token: Option<String>,
    max_length: usize,
    min_length: usize,
    do_sample: bool,
    wait_for_model: bool,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_length: usize,
    min_length: usize,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct InferenceOutput {
    summary_text: String,
}

impl HuggingFaceSummarizer {
    pub fn new(config: &SummarizerConfig, token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            endpoint: format!("{}/{}", config.api_base.trim_end_matches('/'), config.model),
            token,
            max_length: config.max_length,
            min_length: config.min_length,
            do_sample: config.do_sample,
            wait_for_model: config.wait_for_model,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&self, text: &'a str) -> InferenceRequest<'a> {
        InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                max_length: self.max_length,
                min_length: self.min_length,
                do_sample: self.do_sample,
            },
            options: InferenceOptions {
                wait_for_model: self.wait_for_model,
            },
        }
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let mut req = self.client.post(&self.endpoint).json(&self.request_body(text));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await
            .with_context(|| format!("inference request failed: {}", self.endpoint))?;

        let status = resp.status();
        let body = resp.text().await
            .context("failed to read inference response")?;
        if !status.is_success() {
            anyhow::bail!("inference endpoint returned {}: {}", status, body);
        }
        parse_output(&body)
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

/// Extract the first `summary_text` from a `[{"summary_text": ...}]` response.
fn parse_output(body: &str) -> Result<String> {
    let outputs: Vec<InferenceOutput> = serde_json::from_str(body)
        .with_context(|| format!("unexpected inference response: {}", body))?;
    outputs
        .into_iter()
        .next()
        .map(|o| o.summary_text.trim().to_string())
        .context("inference response contained no summaries")
}
