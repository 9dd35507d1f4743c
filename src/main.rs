use anyhow::{Context, Result};
use news_digest::aggregator::fetch_news_articles;
use news_digest::api::{create_router, AppState};
use news_digest::config::Config;
use news_digest::feed::rss_client::HttpFeedSource;
use news_digest::summarize::build_summarizer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "news_digest=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    // Load saved keys from .env (real env vars take precedence)
    Config::load_env_file();

    let config_path = std::env::var("NEWS_DIGEST_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));
    let config = Config::load(&config_path)?;
    tracing::info!(
        config = %config_path.display(),
        feeds = config.feeds.urls.len(),
        provider = ?config.summarizer.provider,
        "config loaded"
    );

    let feed_source = Arc::new(HttpFeedSource::new(config.feeds.request_timeout_ms));
    let summarizer = build_summarizer(&config.summarizer, Config::hf_api_token());
    let bind_addr = config.server.bind_addr.clone();
    let refresh_interval = config.feeds.refresh_interval_s;
    let state = AppState::new(config, feed_source, summarizer);

    if let Some(secs) = refresh_interval.filter(|&s| s > 0) {
        let refresh_state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(secs));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                fetch_news_articles(
                    refresh_state.feed_source.as_ref(),
                    &refresh_state.store,
                    &refresh_state.config.feeds,
                )
                .await;
            }
        });
        tracing::info!(interval_s = secs, "background feed refresh enabled");
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!(addr = %bind_addr, "listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
