pub mod analyzer;
pub mod cache;
pub mod fetcher;
pub mod http;
pub mod pagespeed;

pub use analyzer::SeoAnalyzer;
pub use cache::AnalysisCache;
pub use fetcher::{FetchedPage, HttpPageFetcher, PageFetcher};
pub use pagespeed::{DisabledPerformance, PageSpeedService, PerformanceProvider};
