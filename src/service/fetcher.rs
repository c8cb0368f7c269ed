//! Page retrieval behind the `PageFetcher` seam.

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::config::Config;
use crate::domain::models::PageSignals;
use crate::error::{AppError, Result};
use crate::extractor::PageExtractor;
use crate::service::http::create_client;

/// A fetched page reduced to what the analyzers consume.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: Url,
    pub status_code: u16,
    pub signals: PageSignals,
    pub text: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieve and extract one page.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;

    fn name(&self) -> &'static str;
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: create_client(&config.user_agent, config.request_timeout())?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Extract signals and body text from raw markup.
///
/// `Html` is not `Send`, so parsing stays out of any `.await`.
pub fn parse_page(url: Url, status_code: u16, body: &str) -> Result<FetchedPage> {
    let document = Html::parse_document(body);
    let signals = PageExtractor::extract_signals(&document, &url);
    let text = PageExtractor::extract_text(&document);

    if text.trim().is_empty() {
        return Err(AppError::parse(format!("no readable text found at {}", url)));
    }

    Ok(FetchedPage {
        url,
        status_code,
        signals,
        text,
    })
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        tracing::debug!("Fetching {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(format!("{} returned HTTP {}", url, status)));
        }

        let final_url = response.url().clone();
        let body = response.text().await?;
        tracing::debug!("Fetched {} ({} bytes)", final_url, body.len());

        parse_page(final_url, status.as_u16(), &body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
