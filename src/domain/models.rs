//! Domain entities - what a page looks like to the scorers, and what they hand back

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Upper bound of every rubric sub-score.
pub const MAX_SUB_SCORE: u8 = 5;

/// A keyword profile never holds more than this many entries.
pub const MAX_KEYWORDS: usize = 10;

// ====== Enums ======

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadabilityLevel {
    #[serde(rename = "Very Easy")]
    VeryEasy,
    #[serde(rename = "Easy")]
    Easy,
    #[serde(rename = "Fairly Easy")]
    FairlyEasy,
    #[serde(rename = "Standard")]
    Standard,
    #[serde(rename = "Fairly Difficult")]
    FairlyDifficult,
    #[serde(rename = "Difficult")]
    Difficult,
    #[serde(rename = "Very Difficult")]
    VeryDifficult,
    /// Only used by neutral results of failed analyses.
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ReadabilityLevel {
    /// Map a 0-100 reading-ease score onto its label. Thresholds are
    /// inclusive lower bounds, checked from the top.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            ReadabilityLevel::VeryEasy
        } else if score >= 80.0 {
            ReadabilityLevel::Easy
        } else if score >= 70.0 {
            ReadabilityLevel::FairlyEasy
        } else if score >= 60.0 {
            ReadabilityLevel::Standard
        } else if score >= 50.0 {
            ReadabilityLevel::FairlyDifficult
        } else if score >= 30.0 {
            ReadabilityLevel::Difficult
        } else {
            ReadabilityLevel::VeryDifficult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadabilityLevel::VeryEasy => "Very Easy",
            ReadabilityLevel::Easy => "Easy",
            ReadabilityLevel::FairlyEasy => "Fairly Easy",
            ReadabilityLevel::Standard => "Standard",
            ReadabilityLevel::FairlyDifficult => "Fairly Difficult",
            ReadabilityLevel::Difficult => "Difficult",
            ReadabilityLevel::VeryDifficult => "Very Difficult",
            ReadabilityLevel::Unknown => "Unknown",
        }
    }
}

// ====== Structural signals ======

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

impl Headings {
    pub fn counts(&self) -> HeadingCounts {
        HeadingCounts {
            h1: self.h1.len(),
            h2: self.h2.len(),
            h3: self.h3.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStats {
    pub total: usize,
    pub missing_alt: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    pub internal: usize,
    pub external: usize,
}

/// Structural facts pulled out of one page's markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSignals {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub headings: Headings,
    pub images: ImageStats,
    pub links: LinkStats,
    pub has_viewport: bool,
}

impl PageSignals {
    /// Title length in characters; 0 when missing.
    pub fn title_length(&self) -> usize {
        self.title.as_deref().map(|t| t.chars().count()).unwrap_or(0)
    }

    /// Meta description length in characters; 0 when missing.
    pub fn meta_description_length(&self) -> usize {
        self.meta_description
            .as_deref()
            .map(|d| d.chars().count())
            .unwrap_or(0)
    }
}

// ====== Text ======

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub word_count: usize,
    pub paragraph_count: usize,
    pub sentence_count: usize,
    #[serde(serialize_with = "serialize_one_decimal")]
    pub readability_score: f64,
    pub readability_level: ReadabilityLevel,
}

fn serialize_one_decimal<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(crate::analysis::round_to(*value, 1))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub term: String,
    pub count: usize,
    pub density: f64,
}

/// Ranked keywords of one page, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordProfile(Vec<KeywordEntry>);

impl KeywordProfile {
    /// Build a profile from already-ranked entries, keeping at most
    /// `MAX_KEYWORDS` of them.
    pub fn new(mut entries: Vec<KeywordEntry>) -> Self {
        entries.truncate(MAX_KEYWORDS);
        Self(entries)
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeywordEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn top(&self) -> Option<&KeywordEntry> {
        self.0.first()
    }

    pub fn density_of(&self, term: &str) -> Option<f64> {
        self.0.iter().find(|e| e.term == term).map(|e| e.density)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.iter().any(|e| e.term == term)
    }
}

// ====== Scores ======

/// One labelled rubric sub-score and the feedback explaining it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub label: String,
    pub score: u8,
    pub feedback: Vec<String>,
}

impl ScoreComponent {
    /// Clamps `score` into `0..=MAX_SUB_SCORE`.
    pub fn new(label: impl Into<String>, score: i32) -> Self {
        Self {
            label: label.into(),
            score: score.clamp(0, MAX_SUB_SCORE as i32) as u8,
            feedback: Vec::new(),
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback.push(feedback.into());
        self
    }

    pub fn zero(label: impl Into<String>) -> Self {
        Self::new(label, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoResult {
    pub title: ScoreComponent,
    pub meta_description: ScoreComponent,
    pub headings: ScoreComponent,
    pub mobile: ScoreComponent,
    pub images: ScoreComponent,
    pub overall_score: u8,
    pub recommendations: Vec<String>,
    pub signals: PageSignals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AnalysisError>,
}

impl SeoResult {
    pub fn components(&self) -> [&ScoreComponent; 5] {
        [
            &self.title,
            &self.meta_description,
            &self.headings,
            &self.mobile,
            &self.images,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResult {
    pub length: ScoreComponent,
    pub readability: ScoreComponent,
    pub keywords: ScoreComponent,
    pub content_score: f64,
    pub feedback: Vec<String>,
    pub recommendations: Vec<String>,
    pub metrics: TextMetrics,
    pub top_keywords: KeywordProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AnalysisError>,
}

// ====== Performance ======

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricDetail {
    pub score: Option<u8>,
    pub display_value: Option<String>,
    pub numeric_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    pub first_contentful_paint: Option<MetricDetail>,
    pub speed_index: Option<MetricDetail>,
    pub largest_contentful_paint: Option<MetricDetail>,
    pub time_to_interactive: Option<MetricDetail>,
    pub total_blocking_time: Option<MetricDetail>,
    pub cumulative_layout_shift: Option<MetricDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub performance_score: Option<u8>,
    pub metrics: CoreWebVitals,
    pub opportunities: Vec<AuditItem>,
    pub passed_audits: Vec<AuditItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PerformanceReport {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            error: Some(reason.into()),
            ..Default::default()
        }
    }
}

// ====== Reports ======

/// Everything computed for a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    pub url: String,
    pub domain: String,
    pub seo: SeoResult,
    pub content: ContentResult,
    pub performance: PerformanceReport,
}

impl PageReport {
    pub fn is_degraded(&self) -> bool {
        self.seo.error.is_some() || self.content.error.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair<T> {
    pub main: T,
    pub competitor: T,
}

impl<T> Pair<T> {
    pub fn new(main: T, competitor: T) -> Self {
        Self { main, competitor }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub seo_scores: Pair<u8>,
    pub content_scores: Pair<f64>,
    pub performance_scores: Pair<Option<u8>>,
    pub word_counts: Pair<usize>,
    pub readability: Pair<f64>,
    pub title_length: Pair<usize>,
    pub meta_description_length: Pair<usize>,
    pub headings: Pair<HeadingCounts>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordOverlap {
    pub keyword: String,
    pub main_density: f64,
    pub competitor_density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub domains: Pair<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ComparisonMetrics>,
    pub keyword_overlap: Vec<KeywordOverlap>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AnalysisError>,
}

/// The combined result handed to the presentation layer and cached per
/// (url, competitor url).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub url: String,
    pub competitor_url: Option<String>,
    pub main: PageReport,
    pub competitor: Option<PageReport>,
    pub comparison: Option<ComparisonResult>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readability_thresholds_are_inclusive_lower_bounds() {
        assert_eq!(ReadabilityLevel::from_score(90.0), ReadabilityLevel::VeryEasy);
        assert_eq!(ReadabilityLevel::from_score(89.99), ReadabilityLevel::Easy);
        assert_eq!(ReadabilityLevel::from_score(70.0), ReadabilityLevel::FairlyEasy);
        assert_eq!(ReadabilityLevel::from_score(60.0), ReadabilityLevel::Standard);
        assert_eq!(ReadabilityLevel::from_score(50.0), ReadabilityLevel::FairlyDifficult);
        assert_eq!(ReadabilityLevel::from_score(30.0), ReadabilityLevel::Difficult);
        assert_eq!(ReadabilityLevel::from_score(29.9), ReadabilityLevel::VeryDifficult);
        assert_eq!(ReadabilityLevel::from_score(0.0), ReadabilityLevel::VeryDifficult);
    }

    #[test]
    fn readability_level_serializes_as_label() {
        let json = serde_json::to_string(&ReadabilityLevel::FairlyDifficult).unwrap();
        assert_eq!(json, "\"Fairly Difficult\"");
    }

    #[test]
    fn score_component_is_clamped() {
        assert_eq!(ScoreComponent::new("Headings", -3).score, 0);
        assert_eq!(ScoreComponent::new("Headings", 9).score, MAX_SUB_SCORE);
        assert_eq!(ScoreComponent::new("Headings", 4).score, 4);
    }

    #[test]
    fn keyword_profile_caps_entries() {
        let entries = (0..15)
            .map(|i| KeywordEntry {
                term: format!("term{}", i),
                count: 15 - i,
                density: 1.0,
            })
            .collect();
        let profile = KeywordProfile::new(entries);
        assert_eq!(profile.len(), MAX_KEYWORDS);
        assert_eq!(profile.top().map(|e| e.term.as_str()), Some("term0"));
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let signals = PageSignals {
            title: Some("Café".to_string()),
            ..Default::default()
        };
        assert_eq!(signals.title_length(), 4);
        assert_eq!(signals.meta_description_length(), 0);
    }
}
