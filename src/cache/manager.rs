//! Incremental cache: manifest (checksums/etags for change detection) and
//! run state (fetched/failed/pending URLs), batch-written to disk.
//!
//! Grounded on `original_source/src/docpull/cache/manager.py`'s
//! `CacheManager`: dirty-flag batched writes, O(1) set lookups for
//! fetched/failed, TTL eviction. The `discovered`/pending-URL-list methods
//! are a supplement (SPEC_FULL.md §14): the original has no resume list for
//! URLs queued-but-not-yet-fetched, so a crash mid-crawl loses discovery
//! progress; this implementation persists it alongside `state.json`.

use crate::error::FetchResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub checksum: String,
    pub file_path: String,
    pub fetched_at: DateTime<Utc>,
    pub size: usize,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CacheState {
    fetched_urls: HashSet<String>,
    failed_urls: HashSet<String>,
    discovered_urls: HashSet<String>,
    last_run: Option<DateTime<Utc>>,
}

/// Compute the SHA-256 hex digest of `content`. Shared with
/// [`crate::cache::streaming_dedup`] so both use identical hashing.
#[must_use]
pub fn compute_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

pub struct CacheManager {
    cache_dir: PathBuf,
    ttl_days: Option<u32>,
    manifest_path: PathBuf,
    state_path: PathBuf,
    manifest: HashMap<String, ManifestEntry>,
    state: CacheState,
    manifest_dirty: bool,
    state_dirty: bool,
}

impl CacheManager {
    pub async fn open(cache_dir: impl Into<PathBuf>, ttl_days: Option<u32>) -> FetchResult<Self> {
        let cache_dir = cache_dir.into();
        tokio::fs::create_dir_all(&cache_dir).await?;
        let manifest_path = cache_dir.join("manifest.json");
        let state_path = cache_dir.join("state.json");

        let manifest = load_json(&manifest_path).await.unwrap_or_default();
        let state = load_json(&state_path).await.unwrap_or_default();

        Ok(Self {
            cache_dir,
            ttl_days,
            manifest_path,
            state_path,
            manifest,
            state,
            manifest_dirty: false,
            state_dirty: false,
        })
    }

    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Flush any pending manifest/state changes to disk via atomic
    /// temp-file-then-rename writes.
    pub async fn flush(&mut self) -> FetchResult<()> {
        if self.manifest_dirty {
            write_json_atomic(&self.manifest_path, &self.manifest).await?;
            self.manifest_dirty = false;
        }
        if self.state_dirty {
            write_json_atomic(&self.state_path, &self.state).await?;
            self.state_dirty = false;
        }
        Ok(())
    }

    /// Whether `url`'s content has changed since the last cached fetch, per
    /// the strongest available signal: ETag, then Last-Modified, then a
    /// content checksum. A URL never seen before is always "changed".
    #[must_use]
    pub fn has_changed(
        &self,
        url: &str,
        content: Option<&[u8]>,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> bool {
        let Some(cached) = self.manifest.get(url) else {
            return true;
        };
        if let (Some(etag), Some(cached_etag)) = (etag, cached.etag.as_deref()) {
            return etag != cached_etag;
        }
        if let (Some(lm), Some(cached_lm)) = (last_modified, cached.last_modified.as_deref()) {
            return lm != cached_lm;
        }
        if let Some(content) = content {
            return compute_checksum(content) != cached.checksum;
        }
        true
    }

    pub fn update_cache(
        &mut self,
        url: &str,
        content: &[u8],
        file_path: &Path,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) {
        self.manifest.insert(
            url.to_string(),
            ManifestEntry {
                checksum: compute_checksum(content),
                file_path: file_path.display().to_string(),
                fetched_at: Utc::now(),
                size: content.len(),
                etag: etag.map(str::to_string),
                last_modified: last_modified.map(str::to_string),
            },
        );
        self.manifest_dirty = true;
    }

    pub fn mark_fetched(&mut self, url: &str) {
        self.state.fetched_urls.insert(url.to_string());
        self.state.discovered_urls.remove(url);
        self.state_dirty = true;
    }

    pub fn mark_failed(&mut self, url: &str) {
        self.state.failed_urls.insert(url.to_string());
        self.state_dirty = true;
    }

    #[must_use]
    pub fn is_fetched(&self, url: &str) -> bool {
        self.state.fetched_urls.contains(url)
    }

    #[must_use]
    pub fn is_failed(&self, url: &str) -> bool {
        self.state.failed_urls.contains(url)
    }

    /// Record URLs discovered but not yet fetched, so a resumed run can
    /// pick up the crawl frontier instead of re-discovering it.
    pub fn save_discovered_urls(&mut self, urls: impl IntoIterator<Item = String>) {
        self.state.discovered_urls.extend(urls);
        self.state_dirty = true;
    }

    #[must_use]
    pub fn get_pending_urls(&self) -> HashSet<String> {
        self.state.discovered_urls.clone()
    }

    /// Clear the pending-discovery list. Only meaningful once a run
    /// completes with zero failures; a run with failures keeps its pending
    /// list so resume can retry them (SPEC_FULL.md §9 decision 1 — skips
    /// don't block clearing, only failures do).
    pub fn clear_discovered_urls(&mut self) {
        self.state.discovered_urls.clear();
        self.state_dirty = true;
    }

    pub fn start_session(&mut self) {
        self.state.last_run = Some(Utc::now());
        self.state_dirty = true;
    }

    pub async fn clear_state(&mut self) -> FetchResult<()> {
        self.state = CacheState::default();
        self.state_dirty = true;
        self.flush().await
    }

    /// Remove manifest entries older than `ttl_days` (or the instance
    /// default). Returns the number of entries evicted.
    pub fn evict_expired(&mut self, ttl_days: Option<u32>) -> usize {
        let Some(ttl) = ttl_days.or(self.ttl_days) else {
            return 0;
        };
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(ttl));
        let to_remove: Vec<String> = self
            .manifest
            .iter()
            .filter(|(_, entry)| entry.fetched_at < cutoff)
            .map(|(url, _)| url.clone())
            .collect();
        for url in &to_remove {
            self.manifest.remove(url);
        }
        if !to_remove.is_empty() {
            self.manifest_dirty = true;
            log::info!("evicted {} expired cache entries", to_remove.len());
        }
        to_remove.len()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cached_urls: self.manifest.len(),
            fetched_urls: self.state.fetched_urls.len(),
            failed_urls: self.state.failed_urls.len(),
            pending_urls: self.state.discovered_urls.len(),
            last_run: self.state.last_run,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub cached_urls: usize,
    pub fetched_urls: usize,
    pub failed_urls: usize,
    pub pending_urls: usize,
    pub last_run: Option<DateTime<Utc>>,
}

async fn load_json<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> FetchResult<T> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> FetchResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = tempfile::NamedTempFile::new_in(dir)?;
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(tmp.path(), &bytes).await?;
    tmp.persist(path).map_err(|e| crate::error::FetchError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_url_is_always_changed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::open(dir.path(), None).await.unwrap();
        assert!(cache.has_changed("https://example.com", Some(b"hello"), None, None));
    }

    #[tokio::test]
    async fn checksum_match_means_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CacheManager::open(dir.path(), None).await.unwrap();
        cache.update_cache("https://example.com", b"hello", Path::new("out/a.md"), None, None);
        assert!(!cache.has_changed("https://example.com", Some(b"hello"), None, None));
        assert!(cache.has_changed("https://example.com", Some(b"world"), None, None));
    }

    #[tokio::test]
    async fn flush_persists_and_reload_restores() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut cache = CacheManager::open(dir.path(), None).await.unwrap();
            cache.mark_fetched("https://example.com/a");
            cache.save_discovered_urls(["https://example.com/b".to_string()]);
            cache.flush().await.unwrap();
        }
        let reopened = CacheManager::open(dir.path(), None).await.unwrap();
        assert!(reopened.is_fetched("https://example.com/a"));
        assert_eq!(reopened.get_pending_urls().len(), 1);
    }

    #[tokio::test]
    async fn mark_fetched_clears_pending_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CacheManager::open(dir.path(), None).await.unwrap();
        cache.save_discovered_urls(["https://example.com/a".to_string()]);
        cache.mark_fetched("https://example.com/a");
        assert!(cache.get_pending_urls().is_empty());
    }

    #[tokio::test]
    async fn evict_expired_removes_old_entries_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CacheManager::open(dir.path(), None).await.unwrap();
        cache.update_cache("https://example.com/fresh", b"x", Path::new("a"), None, None);
        if let Some(entry) = cache.manifest.get_mut("https://example.com/fresh") {
            entry.fetched_at = Utc::now() - chrono::Duration::days(100);
        }
        cache.update_cache("https://example.com/new", b"y", Path::new("b"), None, None);
        let evicted = cache.evict_expired(Some(30));
        assert_eq!(evicted, 1);
        assert!(!cache.manifest.contains_key("https://example.com/fresh"));
        assert!(cache.manifest.contains_key("https://example.com/new"));
    }
}
