//! The analysis and scoring engine.
//!
//! Everything in here is synchronous and pure: it takes already-extracted
//! page data and returns fresh result values. Fetching, caching and
//! presentation live in `service`.
//!
//! - `text_stats`: word/sentence/paragraph counts and readability
//! - `keywords`: stop-word filtered, frequency-ranked keyword profile
//! - `seo`: structural rubric over `PageSignals`
//! - `content`: rubric over `TextMetrics` + `KeywordProfile`
//! - `comparison`: delta report between two page reports

pub mod comparison;
pub mod content;
pub mod keywords;
pub mod seo;
pub mod text_stats;

pub use comparison::compare_pages;
pub use content::score_content;
pub use keywords::extract_keywords;
pub use seo::score_seo;

/// Round to `decimals` places, ties to even.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
