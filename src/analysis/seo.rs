//! Structural SEO rubric.
//!
//! Five sub-scores (title, meta description, headings, mobile, images), each
//! 0-5, an overall score that is their truncated mean, and a list of
//! recommendations.

use crate::domain::models::{HeadingCounts, ImageStats, PageSignals, ScoreComponent, SeoResult};
use crate::error::AnalysisError;

/// Sub-scores under this threshold surface their feedback as recommendations.
const RECOMMEND_BELOW: u8 = 4;
const MIN_INTERNAL_LINKS: usize = 5;

struct LengthRule {
    label: &'static str,
    subject: &'static str,
    missing: &'static str,
    min: usize,
    max: usize,
}

const TITLE_RULE: LengthRule = LengthRule {
    label: "Title",
    subject: "Title",
    missing: "Missing page title",
    min: 30,
    max: 60,
};

const META_DESCRIPTION_RULE: LengthRule = LengthRule {
    label: "Meta Description",
    subject: "Meta description",
    missing: "Missing meta description",
    min: 70,
    max: 160,
};

/// Apply the rubric to one page's structural signals.
pub fn score_seo(signals: &PageSignals) -> SeoResult {
    let title = check_length(&TITLE_RULE, signals.title.as_deref());
    let meta_description = check_length(&META_DESCRIPTION_RULE, signals.meta_description.as_deref());
    let headings = check_headings(signals.headings.counts());
    let mobile = check_mobile(signals.has_viewport);
    let images = check_images(signals.images);

    let total: u32 = [&title, &meta_description, &headings, &mobile, &images]
        .iter()
        .map(|c| c.score as u32)
        .sum();
    let overall_score = (total / 5) as u8;

    let mut recommendations = Vec::new();
    for component in [&title, &meta_description, &headings] {
        if component.score < RECOMMEND_BELOW {
            recommendations.extend(
                component
                    .feedback
                    .iter()
                    .map(|f| format!("{}: {}", component.label, f)),
            );
        }
    }
    if signals.images.missing_alt > 0 {
        recommendations.push(format!(
            "Add alt text to {} images for better accessibility and SEO",
            signals.images.missing_alt
        ));
    }
    if !signals.has_viewport {
        recommendations.push("Add a viewport meta tag for mobile responsiveness".to_string());
    }
    if signals.links.internal < MIN_INTERNAL_LINKS {
        recommendations.push("Add more internal links to improve site structure".to_string());
    }

    SeoResult {
        title,
        meta_description,
        headings,
        mobile,
        images,
        overall_score,
        recommendations,
        signals: signals.clone(),
        error: None,
    }
}

impl SeoResult {
    /// Neutral all-zero result for a page that could not be fetched or parsed.
    pub fn failed(error: impl Into<AnalysisError>) -> Self {
        Self {
            title: ScoreComponent::zero(TITLE_RULE.label),
            meta_description: ScoreComponent::zero(META_DESCRIPTION_RULE.label),
            headings: ScoreComponent::zero("Headings"),
            mobile: ScoreComponent::zero("Mobile"),
            images: ScoreComponent::zero("Images"),
            overall_score: 0,
            recommendations: vec!["Could not analyze page due to error".to_string()],
            signals: PageSignals::default(),
            error: Some(error.into()),
        }
    }
}

fn check_length(rule: &LengthRule, value: Option<&str>) -> ScoreComponent {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return ScoreComponent::zero(rule.label).with_feedback(rule.missing);
    };

    let len = value.chars().count();
    let (score, feedback) = if len < rule.min {
        (
            2,
            format!("{} is too short (less than {} characters)", rule.subject, rule.min),
        )
    } else if len > rule.max {
        (
            3,
            format!("{} is too long (more than {} characters)", rule.subject, rule.max),
        )
    } else {
        (5, format!("{} length is optimal", rule.subject))
    };

    ScoreComponent::new(rule.label, score).with_feedback(feedback)
}

fn check_headings(counts: HeadingCounts) -> ScoreComponent {
    let mut score = 5;
    let mut feedback = Vec::new();

    if counts.h1 == 0 {
        score -= 2;
        feedback.push("Missing H1 heading");
    } else if counts.h1 > 1 {
        score -= 1;
        feedback.push("Multiple H1 headings (recommended to have only one)");
    }

    if counts.h2 == 0 {
        score -= 1;
        feedback.push("Missing H2 headings");
    }

    feedback
        .into_iter()
        .fold(ScoreComponent::new("Headings", score), |c, f| c.with_feedback(f))
}

fn check_mobile(has_viewport: bool) -> ScoreComponent {
    if has_viewport {
        ScoreComponent::new("Mobile", 5).with_feedback("Viewport meta tag is present")
    } else {
        ScoreComponent::zero("Mobile").with_feedback("Missing viewport meta tag")
    }
}

fn check_images(images: ImageStats) -> ScoreComponent {
    if images.missing_alt == 0 {
        return ScoreComponent::new("Images", 5).with_feedback("All images have alt text");
    }

    let score = if (images.missing_alt as f64) < images.total as f64 / 2.0 {
        3
    } else {
        1
    };
    ScoreComponent::new("Images", score).with_feedback(format!(
        "{} of {} images are missing alt text",
        images.missing_alt, images.total
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Headings, LinkStats};
    use crate::error::{AppError, ErrorKind};
    use crate::test_utils::fixtures;

    fn with_title(title: Option<String>) -> PageSignals {
        PageSignals {
            title,
            ..fixtures::well_formed_signals()
        }
    }

    #[test]
    fn title_score_table() {
        let cases = [
            (None, 0, "Missing page title"),
            (Some("x".repeat(45)), 5, "Title length is optimal"),
            (Some("x".repeat(20)), 2, "Title is too short (less than 30 characters)"),
            (Some("x".repeat(70)), 3, "Title is too long (more than 60 characters)"),
        ];

        for (title, expected_score, expected_feedback) in cases {
            let result = score_seo(&with_title(title.clone()));
            assert_eq!(result.title.score, expected_score, "title {:?}", title);
            assert_eq!(result.title.feedback, vec![expected_feedback.to_string()]);
        }
    }

    #[test]
    fn title_bounds_are_inclusive() {
        assert_eq!(score_seo(&with_title(Some("x".repeat(30)))).title.score, 5);
        assert_eq!(score_seo(&with_title(Some("x".repeat(60)))).title.score, 5);
        assert_eq!(score_seo(&with_title(Some(String::new()))).title.score, 0);
    }

    #[test]
    fn meta_description_follows_its_own_thresholds() {
        let score_for = |len: usize| {
            let signals = PageSignals {
                meta_description: Some("m".repeat(len)),
                ..fixtures::well_formed_signals()
            };
            score_seo(&signals).meta_description.score
        };
        assert_eq!(score_for(69), 2);
        assert_eq!(score_for(70), 5);
        assert_eq!(score_for(160), 5);
        assert_eq!(score_for(161), 3);
    }

    #[test]
    fn end_to_end_missing_title_and_meta() {
        let signals = PageSignals {
            title: None,
            meta_description: None,
            headings: Headings {
                h1: vec!["Welcome".to_string()],
                h2: vec!["About".to_string(), "Contact".to_string()],
                h3: vec![],
            },
            images: ImageStats {
                total: 10,
                missing_alt: 0,
            },
            links: LinkStats {
                internal: 8,
                external: 2,
            },
            has_viewport: true,
        };

        let result = score_seo(&signals);
        let scores: Vec<u8> = result.components().iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![0, 0, 5, 5, 5]);
        assert_eq!(result.overall_score, 3);
        crate::assert_has_message!(&result.recommendations, "Title: Missing page title");
        crate::assert_has_message!(
            &result.recommendations,
            "Meta Description: Missing meta description"
        );
        assert!(result.error.is_none());
    }

    #[test]
    fn heading_penalties() {
        let score_for = |h1: usize, h2: usize| {
            let signals = PageSignals {
                headings: Headings {
                    h1: vec!["h".to_string(); h1],
                    h2: vec!["h".to_string(); h2],
                    h3: vec![],
                },
                ..fixtures::well_formed_signals()
            };
            score_seo(&signals).headings
        };

        assert_eq!(score_for(1, 1).score, 5);
        assert_eq!(score_for(2, 1).score, 4);
        assert_eq!(score_for(0, 1).score, 3);
        let worst = score_for(0, 0);
        assert_eq!(worst.score, 2);
        assert_eq!(
            worst.feedback,
            vec!["Missing H1 heading".to_string(), "Missing H2 headings".to_string()]
        );
    }

    #[test]
    fn heading_feedback_becomes_recommendations_when_low() {
        let signals = PageSignals {
            headings: Headings::default(),
            ..fixtures::well_formed_signals()
        };
        let result = score_seo(&signals);
        crate::assert_has_message!(&result.recommendations, "Headings: Missing H1 heading");
        crate::assert_has_message!(&result.recommendations, "Headings: Missing H2 headings");
    }

    #[test]
    fn image_alt_thresholds() {
        let score_for = |total: usize, missing_alt: usize| {
            check_images(ImageStats { total, missing_alt }).score
        };
        assert_eq!(score_for(0, 0), 5);
        assert_eq!(score_for(10, 0), 5);
        assert_eq!(score_for(10, 4), 3);
        assert_eq!(score_for(10, 5), 1);
        assert_eq!(score_for(3, 3), 1);
    }

    #[test]
    fn structural_recommendations() {
        let signals = PageSignals {
            images: ImageStats {
                total: 4,
                missing_alt: 3,
            },
            links: LinkStats {
                internal: 2,
                external: 0,
            },
            has_viewport: false,
            ..fixtures::well_formed_signals()
        };
        let result = score_seo(&signals);
        assert_eq!(result.mobile.score, 0);
        assert_eq!(result.images.score, 1);
        crate::assert_has_message!(
            &result.recommendations,
            "Add alt text to 3 images for better accessibility and SEO"
        );
        crate::assert_has_message!(
            &result.recommendations,
            "Add a viewport meta tag for mobile responsiveness"
        );
        crate::assert_has_message!(
            &result.recommendations,
            "Add more internal links to improve site structure"
        );
    }

    #[test]
    fn well_formed_page_scores_full_marks_without_recommendations() {
        let result = score_seo(&fixtures::well_formed_signals());
        assert_eq!(result.overall_score, 5);
        assert!(result.recommendations.is_empty(), "{:?}", result.recommendations);
    }

    #[test]
    fn scoring_is_idempotent() {
        let signals = fixtures::well_formed_signals();
        assert_eq!(score_seo(&signals), score_seo(&signals));
    }

    #[test]
    fn failed_result_is_fully_shaped() {
        let result = SeoResult::failed(&AppError::fetch("timed out"));
        assert_eq!(result.overall_score, 0);
        assert!(result.components().iter().all(|c| c.score == 0));
        assert_eq!(
            result.recommendations,
            vec!["Could not analyze page due to error".to_string()]
        );
        assert_eq!(result.error.as_ref().map(|e| e.kind), Some(ErrorKind::FetchFailure));
        assert_eq!(result.signals, PageSignals::default());
    }
}
