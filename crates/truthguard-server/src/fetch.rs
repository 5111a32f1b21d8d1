//! Fetching article text for URL inputs

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use truthguard_core::{Error, Result};
use url::Url;

/// Source of plain text for a URL
#[async_trait]
pub trait TextFetcher: Send + Sync {
    /// Fetch the page at `url` and reduce it to its main text
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "TruthGuardBot/1.0".to_string()
}

/// Fetches pages over HTTP(S) with reqwest
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl TextFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::upstream_fetch(describe_fetch_error(&e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::upstream_fetch(describe_fetch_error(&e)))?;

        Ok(extract_main_text(&body))
    }
}

/// Render a reqwest error with every cause in its source chain
fn describe_fetch_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();

    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    if err.is_timeout() && !message.contains("timed out") {
        message.push_str(": operation timed out");
    }
    message
}

/// Reduce an HTML document to the text of its primary content region.
///
/// Prefers the first `<article>`, then `<main>`, then `<body>`. Text nodes
/// are trimmed, empty ones dropped, and the rest joined with single spaces;
/// script and style contents are skipped.
pub fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let region = ["article", "main", "body"]
        .iter()
        .filter_map(|tag| Selector::parse(tag).ok())
        .find_map(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    collect_text(region)
}

const NON_CONTENT_TAGS: [&str; 3] = ["script", "style", "noscript"];

fn collect_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter(|node| {
            node.parent()
                .and_then(|parent| parent.value().as_element())
                .map_or(true, |parent| !NON_CONTENT_TAGS.contains(&parent.name()))
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
