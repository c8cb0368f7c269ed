//! Request layer: fetch, score, compare and cache.

use chrono::Utc;
use std::sync::Arc;
use url::Url;

use crate::analysis::{compare_pages, extract_keywords, score_content, score_seo};
use crate::domain::models::{AnalysisReport, ContentResult, PageReport, SeoResult, TextMetrics};
use crate::error::{AnalysisError, Result};
use crate::service::cache::AnalysisCache;
use crate::service::fetcher::PageFetcher;
use crate::service::http::{domain_of, normalize_url};
use crate::service::pagespeed::PerformanceProvider;

pub struct SeoAnalyzer {
    fetcher: Arc<dyn PageFetcher>,
    performance: Arc<dyn PerformanceProvider>,
    cache: Arc<AnalysisCache>,
}

impl SeoAnalyzer {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        performance: Arc<dyn PerformanceProvider>,
        cache: Arc<AnalysisCache>,
    ) -> Self {
        Self {
            fetcher,
            performance,
            cache,
        }
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// Analyze `url` and, when given, compare it with `competitor`.
    ///
    /// Only URL validation fails the call. Fetch and parse problems are
    /// folded into neutral results inside the report.
    pub async fn analyze(&self, url: &str, competitor: Option<&str>) -> Result<Arc<AnalysisReport>> {
        let main_url = normalize_url(url)?;
        let competitor_url = competitor
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(normalize_url)
            .transpose()?;

        let key = AnalysisCache::key(main_url.as_str(), competitor_url.as_ref().map(Url::as_str));
        if let Some(report) = self.cache.get(&key) {
            tracing::info!("Serving cached analysis for {}", main_url);
            return Ok(report);
        }

        tracing::info!(
            "Analyzing {} (competitor: {})",
            main_url,
            competitor_url.as_ref().map_or("none", Url::as_str)
        );

        let main = self.analyze_page(&main_url).await;
        let (competitor, comparison) = match &competitor_url {
            Some(competitor_url) => {
                let competitor = self.analyze_page(competitor_url).await;
                let comparison = compare_pages(&main, &competitor);
                (Some(competitor), Some(comparison))
            }
            None => (None, None),
        };

        let report = Arc::new(AnalysisReport {
            url: main_url.to_string(),
            competitor_url: competitor_url.map(String::from),
            main,
            competitor,
            comparison,
            generated_at: Utc::now(),
        });
        self.cache.insert(key, report.clone());
        Ok(report)
    }

    /// Full single-page pipeline. Always returns a fully shaped report.
    pub async fn analyze_page(&self, url: &Url) -> PageReport {
        let (seo, content) = match self.fetcher.fetch(url).await {
            Ok(page) => {
                let metrics = TextMetrics::from_text(&page.text);
                let keywords = extract_keywords(&page.text);
                tracing::debug!(
                    "{}: {} words, {} keywords, readability {:.1}",
                    url,
                    metrics.word_count,
                    keywords.len(),
                    metrics.readability_score
                );
                (score_seo(&page.signals), score_content(&metrics, &keywords))
            }
            Err(e) => {
                tracing::warn!("Analysis of {} degraded ({}): {}", url, self.fetcher.name(), e);
                let error = AnalysisError::from(&e);
                (SeoResult::failed(error.clone()), ContentResult::failed(error))
            }
        };

        let performance = self.performance.measure(url).await;

        PageReport {
            url: url.to_string(),
            domain: domain_of(url),
            seo,
            content,
            performance,
        }
    }
}
