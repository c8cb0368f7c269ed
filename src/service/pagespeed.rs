//! Performance measurement through the PageSpeed Insights v5 API.
//!
//! Measurement is best-effort: any failure becomes a `PerformanceReport`
//! with no score and the reason in `error`, never an `Err`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

use crate::config::PageSpeedConfig;
use crate::domain::models::{AuditItem, CoreWebVitals, MetricDetail, PerformanceReport};
use crate::error::{AppError, Result};
use crate::service::http::create_client;

const SERVICE: &str = "pagespeed";
const PASSING_SCORE: f64 = 0.9;
const MAX_LISTED_AUDITS: usize = 5;
const SKIPPED_DISPLAY_MODES: &[&str] = &["informative", "manual", "notApplicable"];

#[async_trait]
pub trait PerformanceProvider: Send + Sync {
    async fn measure(&self, url: &Url) -> PerformanceReport;

    fn name(&self) -> &'static str;
}

/// Used when performance measurement is switched off.
pub struct DisabledPerformance;

#[async_trait]
impl PerformanceProvider for DisabledPerformance {
    async fn measure(&self, _url: &Url) -> PerformanceReport {
        PerformanceReport::unavailable("Performance analysis disabled")
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

// ====== PSI response shape ======

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PsiResponse {
    #[serde(default)]
    lighthouse_result: LighthouseResult,
}

#[derive(Debug, Deserialize, Default)]
struct LighthouseResult {
    #[serde(default)]
    categories: Categories,
    #[serde(default)]
    audits: BTreeMap<String, PsiAudit>,
}

#[derive(Debug, Deserialize, Default)]
struct Categories {
    performance: Option<Category>,
}

#[derive(Debug, Deserialize, Default)]
struct Category {
    score: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PsiAudit {
    title: Option<String>,
    description: Option<String>,
    score: Option<f64>,
    score_display_mode: Option<String>,
    display_value: Option<String>,
    numeric_value: Option<f64>,
}

fn to_percent(score: f64) -> u8 {
    (score * 100.0).clamp(0.0, 100.0) as u8
}

impl PsiAudit {
    fn metric(&self) -> MetricDetail {
        MetricDetail {
            score: self.score.map(to_percent),
            display_value: self.display_value.clone(),
            numeric_value: self.numeric_value,
        }
    }

    fn is_skipped(&self) -> bool {
        self.score_display_mode
            .as_deref()
            .is_some_and(|mode| SKIPPED_DISPLAY_MODES.contains(&mode))
    }
}

/// Turn a raw PSI JSON document into a report.
pub fn parse_report(body: &str) -> Result<PerformanceReport> {
    let response: PsiResponse = serde_json::from_str(body)
        .map_err(|e| AppError::service(SERVICE, format!("invalid response: {}", e)))?;
    let result = response.lighthouse_result;
    let audits = &result.audits;

    let metric = |id: &str| audits.get(id).map(PsiAudit::metric);
    let metrics = CoreWebVitals {
        first_contentful_paint: metric("first-contentful-paint"),
        speed_index: metric("speed-index"),
        largest_contentful_paint: metric("largest-contentful-paint"),
        time_to_interactive: metric("interactive"),
        total_blocking_time: metric("total-blocking-time"),
        cumulative_layout_shift: metric("cumulative-layout-shift"),
    };

    let mut opportunities = Vec::new();
    let mut passed_audits = Vec::new();
    for audit in audits.values().filter(|a| !a.is_skipped()) {
        let (Some(score), Some(title)) = (audit.score, audit.title.as_ref()) else {
            continue;
        };
        if score < PASSING_SCORE {
            opportunities.push(AuditItem {
                title: title.clone(),
                description: Some(audit.description.clone().unwrap_or_default()),
                score: to_percent(score),
            });
        } else {
            passed_audits.push(AuditItem {
                title: title.clone(),
                description: None,
                score: to_percent(score),
            });
        }
    }

    opportunities.sort_by_key(|a| a.score);
    opportunities.truncate(MAX_LISTED_AUDITS);
    passed_audits.truncate(MAX_LISTED_AUDITS);

    Ok(PerformanceReport {
        performance_score: result
            .categories
            .performance
            .and_then(|c| c.score)
            .map(to_percent),
        metrics,
        opportunities,
        passed_audits,
        error: None,
    })
}

pub struct PageSpeedService {
    client: Client,
    config: PageSpeedConfig,
}

impl PageSpeedService {
    pub fn new(config: PageSpeedConfig, user_agent: &str) -> anyhow::Result<Self> {
        let client = create_client(user_agent, config.timeout())?;
        Ok(Self { client, config })
    }

    async fn run(&self, url: &Url) -> Result<PerformanceReport> {
        let mut query = vec![
            ("url", url.as_str()),
            ("strategy", self.config.strategy.as_str()),
        ];
        if let Some(key) = self.config.api_key.as_deref() {
            query.push(("key", key));
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::service(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::service(
                SERVICE,
                format!("PageSpeed API error: Status {}", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::service(SERVICE, e.to_string()))?;
        parse_report(&body)
    }
}

#[async_trait]
impl PerformanceProvider for PageSpeedService {
    async fn measure(&self, url: &Url) -> PerformanceReport {
        match self.run(url).await {
            Ok(report) => {
                tracing::debug!("PageSpeed score for {}: {:?}", url, report.performance_score);
                report
            }
            Err(e) => {
                tracing::warn!("PageSpeed measurement failed for {}: {}", url, e);
                PerformanceReport::unavailable(e.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        SERVICE
    }
}
