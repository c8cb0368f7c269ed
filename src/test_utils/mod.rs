/// Builders for realistic inputs shared by unit tests.
#[cfg(test)]
pub mod fixtures {
    use crate::analysis::{score_content, score_seo};
    use crate::domain::models::{
        Headings, ImageStats, KeywordEntry, KeywordProfile, LinkStats, PageReport, PageSignals,
        PerformanceReport, ReadabilityLevel, TextMetrics,
    };

    /// Signals that satisfy every rule of the structural rubric.
    pub fn well_formed_signals() -> PageSignals {
        PageSignals {
            title: Some("Complete Guide to On-Page SEO in 2024".to_string()),
            meta_description: Some(
                "Learn how titles, meta descriptions, headings and images affect how search engines rank your pages."
                    .to_string(),
            ),
            headings: Headings {
                h1: vec!["On-Page SEO".to_string()],
                h2: vec!["Titles".to_string(), "Headings".to_string()],
                h3: vec!["Length".to_string()],
            },
            images: ImageStats {
                total: 4,
                missing_alt: 0,
            },
            links: LinkStats {
                internal: 12,
                external: 3,
            },
            has_viewport: true,
        }
    }

    /// Profile from (term, density) pairs, kept in the given order.
    pub fn keyword_profile(entries: &[(&str, f64)]) -> KeywordProfile {
        KeywordProfile::new(
            entries
                .iter()
                .map(|(term, density)| KeywordEntry {
                    term: term.to_string(),
                    count: (density * 10.0).round() as usize,
                    density: *density,
                })
                .collect(),
        )
    }

    /// A complete, successful page report with a performance score of 80.
    pub fn page_report(domain: &str) -> PageReport {
        let metrics = TextMetrics {
            word_count: 700,
            paragraph_count: 8,
            sentence_count: 40,
            readability_score: 64.2,
            readability_level: ReadabilityLevel::Standard,
        };
        let keywords = keyword_profile(&[("seo", 3.5), ("title", 2.0), ("search", 1.5)]);

        PageReport {
            url: format!("https://{}/", domain),
            domain: domain.to_string(),
            seo: score_seo(&well_formed_signals()),
            content: score_content(&metrics, &keywords),
            performance: PerformanceReport {
                performance_score: Some(80),
                ..Default::default()
            },
        }
    }
}
