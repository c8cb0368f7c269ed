//! Side-by-side comparison of two independently analyzed pages.

use std::collections::HashMap;

use super::round_to;
use crate::domain::models::{
    ComparisonMetrics, ComparisonResult, KeywordOverlap, KeywordProfile, PageReport, Pair,
};
use crate::error::AnalysisError;

const OPTIMAL_TITLE_MAX: usize = 60;
const OPTIMAL_META_MAX: usize = 160;
const SUGGESTED_KEYWORDS: usize = 3;

/// Pair up the metrics of `main` and `competitor`, intersect their keyword
/// profiles and derive insights and recommendations.
///
/// When either side carries an error the result is a stub with only the
/// domains and fixed advisory text.
pub fn compare_pages(main: &PageReport, competitor: &PageReport) -> ComparisonResult {
    let domains = Pair::new(main.domain.clone(), competitor.domain.clone());

    let failure = [main, competitor]
        .into_iter()
        .find_map(|page| page.seo.error.as_ref().or(page.content.error.as_ref()));
    if let Some(error) = failure {
        return ComparisonResult::failed(domains, error.clone());
    }

    let metrics = ComparisonMetrics {
        seo_scores: Pair::new(main.seo.overall_score, competitor.seo.overall_score),
        content_scores: Pair::new(main.content.content_score, competitor.content.content_score),
        performance_scores: Pair::new(
            main.performance.performance_score,
            competitor.performance.performance_score,
        ),
        word_counts: Pair::new(
            main.content.metrics.word_count,
            competitor.content.metrics.word_count,
        ),
        readability: Pair::new(
            round_to(main.content.metrics.readability_score, 1),
            round_to(competitor.content.metrics.readability_score, 1),
        ),
        title_length: Pair::new(
            main.seo.signals.title_length(),
            competitor.seo.signals.title_length(),
        ),
        meta_description_length: Pair::new(
            main.seo.signals.meta_description_length(),
            competitor.seo.signals.meta_description_length(),
        ),
        headings: Pair::new(
            main.seo.signals.headings.counts(),
            competitor.seo.signals.headings.counts(),
        ),
    };

    let keyword_overlap = keyword_overlap(&main.content.top_keywords, &competitor.content.top_keywords);
    let insights = derive_insights(&metrics, &keyword_overlap);
    let recommendations = derive_recommendations(&metrics, &keyword_overlap);

    ComparisonResult {
        domains,
        metrics: Some(metrics),
        keyword_overlap,
        insights,
        recommendations,
        error: None,
    }
}

impl ComparisonResult {
    pub fn failed(domains: Pair<String>, error: impl Into<AnalysisError>) -> Self {
        Self {
            domains,
            metrics: None,
            keyword_overlap: Vec::new(),
            insights: vec!["Could not complete competitor analysis due to error".to_string()],
            recommendations: vec![
                "Fix website access issues to enable competitor analysis".to_string(),
            ],
            error: Some(error.into()),
        }
    }
}

/// Terms present in both profiles, highest competitor density first. Equal
/// competitor densities keep the main profile's ranking.
pub fn keyword_overlap(main: &KeywordProfile, competitor: &KeywordProfile) -> Vec<KeywordOverlap> {
    let competitor_density: HashMap<&str, f64> = competitor
        .iter()
        .map(|e| (e.term.as_str(), e.density))
        .collect();

    let mut overlap: Vec<KeywordOverlap> = main
        .iter()
        .filter_map(|e| {
            competitor_density
                .get(e.term.as_str())
                .map(|&competitor_density| KeywordOverlap {
                    keyword: e.term.clone(),
                    main_density: e.density,
                    competitor_density,
                })
        })
        .collect();

    overlap.sort_by(|a, b| b.competitor_density.total_cmp(&a.competitor_density));
    overlap
}

fn competitor_favored(overlap: &[KeywordOverlap]) -> impl Iterator<Item = &KeywordOverlap> {
    overlap
        .iter()
        .filter(|k| k.competitor_density > k.main_density)
}

fn derive_insights(metrics: &ComparisonMetrics, overlap: &[KeywordOverlap]) -> Vec<String> {
    let mut insights = Vec::new();

    let seo = metrics.seo_scores;
    if seo.main < seo.competitor {
        insights.push(format!(
            "Competitor has a better overall SEO score ({} vs {})",
            seo.competitor, seo.main
        ));
    }

    let words = metrics.word_counts;
    if words.main < words.competitor {
        insights.push(format!(
            "Competitor has more content ({} words vs {} words)",
            words.competitor, words.main
        ));
    }

    if let Pair {
        main: Some(main_perf),
        competitor: Some(competitor_perf),
    } = metrics.performance_scores
    {
        if main_perf < competitor_perf {
            insights.push(format!(
                "Competitor has better page performance score ({} vs {})",
                competitor_perf, main_perf
            ));
        }
    }

    let favored = competitor_favored(overlap).count();
    if !overlap.is_empty() && favored * 2 > overlap.len() {
        insights.push(format!(
            "Competitor uses {} common keywords more effectively",
            favored
        ));
    }

    insights
}

fn derive_recommendations(metrics: &ComparisonMetrics, overlap: &[KeywordOverlap]) -> Vec<String> {
    let mut recommendations = Vec::new();

    let words = metrics.word_counts;
    if words.main < words.competitor {
        recommendations.push(format!(
            "Increase content length to match or exceed competitor's {} words",
            words.competitor
        ));
    }

    let title = metrics.title_length;
    if title.main < title.competitor && title.competitor <= OPTIMAL_TITLE_MAX {
        recommendations
            .push("Optimize title tag length to match competitor's more descriptive title".to_string());
    }

    let meta = metrics.meta_description_length;
    if meta.main < meta.competitor && meta.competitor <= OPTIMAL_META_MAX {
        recommendations.push(
            "Improve meta description to match competitor's more detailed description".to_string(),
        );
    }

    let targets: Vec<&str> = competitor_favored(overlap)
        .take(SUGGESTED_KEYWORDS)
        .map(|k| k.keyword.as_str())
        .collect();
    if !targets.is_empty() {
        recommendations.push(format!(
            "Consider optimizing for these competitor keywords: {}",
            targets.join(", ")
        ));
    }

    recommendations
}
