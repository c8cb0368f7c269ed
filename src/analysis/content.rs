//! Content rubric over text statistics and the keyword profile.

use super::round_to;
use crate::domain::models::{
    ContentResult, KeywordProfile, ScoreComponent, TextMetrics, MAX_SUB_SCORE,
};
use crate::error::AnalysisError;

const TARGET_WORD_COUNT: usize = 600;
const THIN_CONTENT_WORDS: usize = 300;
const DIFFICULT_READABILITY: f64 = 50.0;
const STUFFING_DENSITY: f64 = 5.0;
const LOW_DENSITY: f64 = 1.0;

pub fn score_content(metrics: &TextMetrics, keywords: &KeywordProfile) -> ContentResult {
    let length = check_length(metrics.word_count);
    let readability = check_readability(metrics.readability_score);
    let keyword_score = check_keywords(keywords);

    let sum = (length.score + readability.score + keyword_score.score) as f64;
    let content_score = round_to((sum / 3.0).min(MAX_SUB_SCORE as f64), 1);

    let feedback = [&length, &readability, &keyword_score]
        .iter()
        .flat_map(|c| c.feedback.iter().cloned())
        .collect();

    let top_density = keywords.top().map(|k| k.density).unwrap_or(0.0);
    let mut recommendations = Vec::new();
    if metrics.word_count < TARGET_WORD_COUNT {
        recommendations.push(format!(
            "Increase content length (currently {} words, aim for {}+ words)",
            metrics.word_count, TARGET_WORD_COUNT
        ));
    }
    if metrics.readability_score < DIFFICULT_READABILITY {
        recommendations.push(
            "Simplify content to improve readability (use shorter sentences and simpler words)"
                .to_string(),
        );
    }
    if top_density > STUFFING_DENSITY {
        recommendations.push("Reduce keyword density to avoid keyword stuffing".to_string());
    } else if top_density < LOW_DENSITY && metrics.word_count > THIN_CONTENT_WORDS {
        recommendations
            .push("Increase usage of target keywords to improve relevance".to_string());
    }

    ContentResult {
        length,
        readability,
        keywords: keyword_score,
        content_score,
        feedback,
        recommendations,
        metrics: metrics.clone(),
        top_keywords: keywords.clone(),
        error: None,
    }
}

impl ContentResult {
    /// Neutral result for content that could not be fetched or extracted.
    pub fn failed(error: impl Into<AnalysisError>) -> Self {
        Self {
            length: ScoreComponent::zero("Length"),
            readability: ScoreComponent::zero("Readability"),
            keywords: ScoreComponent::zero("Keywords"),
            content_score: 0.0,
            feedback: vec!["Could not analyze content due to error".to_string()],
            recommendations: vec![
                "Fix website access issues to enable content analysis".to_string(),
            ],
            metrics: TextMetrics::default(),
            top_keywords: KeywordProfile::default(),
            error: Some(error.into()),
        }
    }
}

fn check_length(word_count: usize) -> ScoreComponent {
    let (score, feedback) = match word_count {
        n if n < 300 => (1, "Content is too short (less than 300 words)"),
        n if n < 600 => (2, "Content is somewhat short (300-600 words)"),
        n if n < 1200 => (4, "Content has a good length (600-1200 words)"),
        _ => (5, "Content has excellent length (1200+ words)"),
    };
    ScoreComponent::new("Length", score).with_feedback(feedback)
}

fn check_readability(readability_score: f64) -> ScoreComponent {
    let (score, feedback) = if readability_score < 30.0 {
        (1, "Content is very difficult to read")
    } else if readability_score < 50.0 {
        (2, "Content is difficult to read")
    } else if readability_score < 70.0 {
        (4, "Content has standard readability")
    } else {
        (5, "Content has excellent readability")
    };
    ScoreComponent::new("Readability", score).with_feedback(feedback)
}

fn check_keywords(keywords: &KeywordProfile) -> ScoreComponent {
    let Some(top) = keywords.top() else {
        return ScoreComponent::zero("Keywords").with_feedback("No clear focus keywords identified");
    };

    let (score, feedback) = if top.density > 5.0 {
        (2, "Possible keyword stuffing detected")
    } else if top.density > 3.0 {
        (5, "Good keyword density")
    } else if top.density > 1.0 {
        (4, "Acceptable keyword density")
    } else {
        (2, "Low keyword density")
    };
    ScoreComponent::new("Keywords", score).with_feedback(feedback)
}
