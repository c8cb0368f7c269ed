use anyhow::Context;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::error::{AppError, Result};

/// Build the HTTP client shared by page fetches and service calls.
pub fn create_client(user_agent: &str, timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Parse user input into an absolute http(s) URL, defaulting to https.
pub fn normalize_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidUrl("URL is empty".to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| AppError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            trimmed,
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(AppError::InvalidUrl(format!("{}: missing host", trimmed)));
    }
    Ok(url)
}

/// Host part of a URL including a non-default port, used as the display domain.
pub fn domain_of(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}
