//! Real-time content deduplication: hash content as it's processed and
//! skip saving duplicates, without waiting for a full crawl to finish.
//!
//! Grounded on `original_source/src/docpull/cache/streaming_dedup.py`'s
//! `StreamingDeduplicator`: a lock-guarded `hash -> representative URL` map,
//! checked and updated atomically per page so concurrent workers don't race
//! each other into both saving the same content.

use crate::cache::manager::compute_checksum;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DedupStats {
    pub unique_pages: usize,
    pub total_checked: usize,
    pub duplicates_found: usize,
}

impl DedupStats {
    #[must_use]
    pub fn dedup_rate(&self) -> f64 {
        if self.total_checked == 0 {
            0.0
        } else {
            self.duplicates_found as f64 / self.total_checked as f64
        }
    }
}

pub struct StreamingDeduplicator {
    seen: Mutex<HashMap<String, String>>,
    total_checked: std::sync::atomic::AtomicUsize,
    duplicates_found: std::sync::atomic::AtomicUsize,
}

impl Default for StreamingDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingDeduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(HashMap::new()),
            total_checked: std::sync::atomic::AtomicUsize::new(0),
            duplicates_found: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Check whether `content` has already been registered under a
    /// different URL, registering it as seen if not. Returns
    /// `(should_save, duplicate_of)`: `should_save` is `false` only when
    /// this exact content was already registered under another URL.
    pub async fn check_and_register(&self, url: &str, content: &[u8]) -> (bool, Option<String>) {
        self.total_checked
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let hash = compute_checksum(content);
        let mut seen = self.seen.lock().await;
        match seen.get(&hash) {
            Some(existing) if existing != url => {
                self.duplicates_found
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                (false, Some(existing.clone()))
            }
            Some(_) => (true, None),
            None => {
                seen.insert(hash, url.to_string());
                (true, None)
            }
        }
    }

    /// Read-only check: is `content` already registered, without
    /// registering it under `url`.
    pub async fn is_duplicate(&self, content: &[u8]) -> Option<String> {
        let hash = compute_checksum(content);
        self.seen.lock().await.get(&hash).cloned()
    }

    #[must_use]
    pub fn stats(&self) -> DedupStats {
        let total = self.total_checked.load(std::sync::atomic::Ordering::Relaxed);
        let dupes = self.duplicates_found.load(std::sync::atomic::Ordering::Relaxed);
        DedupStats {
            unique_pages: total.saturating_sub(dupes),
            total_checked: total,
            duplicates_found: dupes,
        }
    }

    pub async fn clear(&self) {
        self.seen.lock().await.clear();
        self.total_checked.store(0, std::sync::atomic::Ordering::Relaxed);
        self.duplicates_found.store(0, std::sync::atomic::Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_registration_should_save() {
        let dedup = StreamingDeduplicator::new();
        let (should_save, dup_of) = dedup
            .check_and_register("https://example.com/a", b"hello world")
            .await;
        assert!(should_save);
        assert!(dup_of.is_none());
    }

    #[tokio::test]
    async fn identical_content_under_new_url_is_duplicate() {
        let dedup = StreamingDeduplicator::new();
        dedup.check_and_register("https://example.com/a", b"hello world").await;
        let (should_save, dup_of) = dedup
            .check_and_register("https://example.com/b", b"hello world")
            .await;
        assert!(!should_save);
        assert_eq!(dup_of.as_deref(), Some("https://example.com/a"));
    }

    #[tokio::test]
    async fn rechecking_same_url_is_not_a_duplicate() {
        let dedup = StreamingDeduplicator::new();
        dedup.check_and_register("https://example.com/a", b"hello world").await;
        let (should_save, dup_of) = dedup
            .check_and_register("https://example.com/a", b"hello world")
            .await;
        assert!(should_save);
        assert!(dup_of.is_none());
    }

    #[tokio::test]
    async fn stats_track_dedup_rate() {
        let dedup = StreamingDeduplicator::new();
        dedup.check_and_register("https://example.com/a", b"x").await;
        dedup.check_and_register("https://example.com/b", b"x").await;
        dedup.check_and_register("https://example.com/c", b"y").await;
        let stats = dedup.stats();
        assert_eq!(stats.total_checked, 3);
        assert_eq!(stats.duplicates_found, 1);
        assert_eq!(stats.unique_pages, 2);
        assert!((stats.dedup_rate() - (1.0 / 3.0)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn clear_resets_state() {
        let dedup = StreamingDeduplicator::new();
        dedup.check_and_register("https://example.com/a", b"x").await;
        dedup.clear().await;
        let stats = dedup.stats();
        assert_eq!(stats.total_checked, 0);
        assert!(dedup.is_duplicate(b"x").await.is_none());
    }
}
