//! Process setup: logging and wiring of the analyzer's collaborators.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::service::{
    AnalysisCache, DisabledPerformance, HttpPageFetcher, PageSpeedService, PerformanceProvider,
    SeoAnalyzer,
};

const DEFAULT_LOG_FILTER: &str = "seo_compare=debug,info";

/// Initialize logging with tracing_subscriber.
///
/// `RUST_LOG` replaces the default filter when set. Output goes to stderr so
/// stdout carries only the report.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

/// Build an analyzer with the HTTP fetcher, the configured performance
/// provider and a fresh cache.
pub fn build_analyzer(config: &Config) -> anyhow::Result<SeoAnalyzer> {
    let fetcher = Arc::new(HttpPageFetcher::new(config)?);

    let performance: Arc<dyn PerformanceProvider> = if config.pagespeed.enabled {
        Arc::new(PageSpeedService::new(
            config.pagespeed.clone(),
            &config.user_agent,
        )?)
    } else {
        Arc::new(DisabledPerformance)
    };
    tracing::debug!("Performance provider: {}", performance.name());

    let cache = Arc::new(AnalysisCache::from_secs(config.cache_ttl_secs));
    Ok(SeoAnalyzer::new(fetcher, performance, cache))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn builds_with_performance_disabled() {
        let mut config = Config::default();
        config.pagespeed.enabled = false;
        let analyzer = build_analyzer(&config).unwrap();
        assert!(analyzer.cache().is_empty());
    }
}
