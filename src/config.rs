//! Runtime configuration.
//!
//! Values come from defaults, then an optional JSON file, then a handful of
//! environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const PAGESPEED_API_KEY_ENV: &str = "PAGESPEED_API_KEY";
pub const REQUEST_TIMEOUT_ENV: &str = "SEO_REQUEST_TIMEOUT_SECS";
pub const CACHE_TTL_ENV: &str = "SEO_CACHE_TTL_SECS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timeout for fetching an analyzed page
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent sent with page requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How long a finished report is served from the cache
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default)]
    pub pagespeed: PageSpeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_pagespeed_endpoint")]
    pub endpoint: String,

    /// "mobile" or "desktop"
    #[serde(default = "default_strategy")]
    pub strategy: String,

    #[serde(default = "default_pagespeed_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    1800
}

fn default_true() -> bool {
    true
}

fn default_pagespeed_endpoint() -> String {
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed".to_string()
}

fn default_strategy() -> String {
    "mobile".to_string()
}

fn default_pagespeed_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            cache_ttl_secs: default_cache_ttl_secs(),
            pagespeed: PageSpeedConfig::default(),
        }
    }
}

impl Default for PageSpeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            endpoint: default_pagespeed_endpoint(),
            strategy: default_strategy(),
            timeout_secs: default_pagespeed_timeout_secs(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Defaults or the given file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from variables resolved through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(PAGESPEED_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.pagespeed.api_key = Some(key);
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV) {
            self.request_timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", REQUEST_TIMEOUT_ENV))?;
        }
        if let Some(raw) = lookup(CACHE_TTL_ENV) {
            self.cache_ttl_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", CACHE_TTL_ENV))?;
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl PageSpeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
