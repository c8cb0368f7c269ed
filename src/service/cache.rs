use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use crate::domain::models::AnalysisReport;

/// Normalized (url, competitor url) pair. An absent competitor is "".
pub type CacheKey = (String, String);

struct CacheEntry {
    report: Arc<AnalysisReport>,
    stored_at: DateTime<Utc>,
}

/// Time-bounded store of finished reports keyed by request.
pub struct AnalysisCache {
    entries: DashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl AnalysisCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::with_capacity(16),
            ttl,
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::seconds(secs.min(u32::MAX as u64) as i64))
    }

    pub fn key(url: &str, competitor: Option<&str>) -> CacheKey {
        (url.to_string(), competitor.unwrap_or_default().to_string())
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<AnalysisReport>> {
        self.get_at(key, Utc::now())
    }

    /// Look up `key` as of `now`; stale entries are evicted.
    pub fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<Arc<AnalysisReport>> {
        {
            let entry = self.entries.get(key)?;
            if self.is_fresh(&entry, now) {
                return Some(entry.report.clone());
            }
        }
        // Re-checked under the shard lock so a concurrent insert survives.
        self.entries.remove_if(key, |_, entry| !self.is_fresh(entry, now));
        None
    }

    pub fn insert(&self, key: CacheKey, report: Arc<AnalysisReport>) {
        self.insert_at(key, report, Utc::now());
    }

    pub fn insert_at(&self, key: CacheKey, report: Arc<AnalysisReport>, now: DateTime<Utc>) {
        self.purge_expired_at(now);
        self.entries.insert(
            key,
            CacheEntry {
                report,
                stored_at: now,
            },
        );
    }

    /// Drop every entry that is stale as of `now`.
    pub fn purge_expired_at(&self, now: DateTime<Utc>) {
        self.entries.retain(|_, entry| self.is_fresh(entry, now));
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.stored_at < self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    fn report(url: &str) -> Arc<AnalysisReport> {
        Arc::new(AnalysisReport {
            url: url.to_string(),
            competitor_url: None,
            main: fixtures::page_report("example.com"),
            competitor: None,
            comparison: None,
            generated_at: Utc::now(),
        })
    }

    #[test]
    fn serves_fresh_entries() {
        let cache = AnalysisCache::from_secs(1800);
        let key = AnalysisCache::key("https://example.com/", None);
        let stored = report("https://example.com/");
        cache.insert(key.clone(), stored.clone());

        let hit = cache.get(&key).unwrap();
        assert!(Arc::ptr_eq(&hit, &stored));
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = AnalysisCache::from_secs(1800);
        let key = AnalysisCache::key("https://example.com/", Some("https://rival.com/"));
        let t0 = Utc::now();
        cache.insert_at(key.clone(), report("https://example.com/"), t0);

        assert!(cache.get_at(&key, t0 + Duration::seconds(1799)).is_some());
        assert!(cache.get_at(&key, t0 + Duration::seconds(1800)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn competitor_is_part_of_the_key() {
        let cache = AnalysisCache::from_secs(60);
        cache.insert(
            AnalysisCache::key("https://example.com/", None),
            report("https://example.com/"),
        );
        assert!(cache
            .get(&AnalysisCache::key("https://example.com/", Some("https://rival.com/")))
            .is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn inserts_sweep_out_entries_that_are_never_read_again() {
        let cache = AnalysisCache::from_secs(60);
        let t0 = Utc::now();
        cache.insert_at(
            AnalysisCache::key("https://old.example/", None),
            report("https://old.example/"),
            t0,
        );
        cache.insert_at(
            AnalysisCache::key("https://mid.example/", None),
            report("https://mid.example/"),
            t0 + Duration::seconds(30),
        );
        cache.insert_at(
            AnalysisCache::key("https://new.example/", None),
            report("https://new.example/"),
            t0 + Duration::seconds(60),
        );

        assert_eq!(cache.len(), 2);
        assert!(cache
            .get_at(&AnalysisCache::key("https://old.example/", None), t0 + Duration::seconds(60))
            .is_none());
    }

    #[test]
    fn stale_lookup_keeps_a_fresher_entry_for_the_same_key() {
        let cache = AnalysisCache::from_secs(60);
        let key = AnalysisCache::key("https://example.com/", None);
        let t0 = Utc::now();
        cache.insert_at(key.clone(), report("https://example.com/"), t0);
        assert!(cache.get_at(&key, t0 + Duration::seconds(90)).is_none());

        // A report stored at the moment of the stale read must not be evicted by it
        let refreshed = report("https://example.com/");
        cache.insert_at(key.clone(), refreshed.clone(), t0 + Duration::seconds(90));
        let hit = cache.get_at(&key, t0 + Duration::seconds(90)).unwrap();
        assert!(Arc::ptr_eq(&hit, &refreshed));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_ttl_disables_caching() {
        let cache = AnalysisCache::from_secs(0);
        let key = AnalysisCache::key("https://example.com/", None);
        let t0 = Utc::now();
        cache.insert_at(key.clone(), report("https://example.com/"), t0);
        assert!(cache.get_at(&key, t0).is_none());
    }
}
