//! The streaming event/stats types emitted by the pipeline and fetcher.
//!
//! Grounded on `original_source/src/docpull/models/events.py`'s
//! `EventType`/`SkipReason`/`FetchEvent`/`FetchStats`. Reduced to the event
//! set SPEC_FULL.md §6 names (drops `index_generated`/`archive_created`/
//! `git_committed`, which belong to post-processing features out of scope
//! here).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    RobotsDisallowed,
    AlreadyFetched,
    CacheUnchanged,
    InvalidContentType,
    DuplicateContent,
    PatternExcluded,
    MaxDepthExceeded,
    HttpError,
    FileExists,
    DryRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Started,
    DiscoveryStarted,
    SitemapFound,
    UrlDiscovered,
    DiscoveryComplete,
    Resumed,
    FetchProgress,
    FetchStarted,
    FetchCompleted,
    FetchFailed,
    FetchSkipped,
    FetchRetrying,
    PageConverted,
    MetadataExtracted,
    PageSaved,
    PageDeduplicated,
    PageFiltered,
    ProcessingStarted,
    ProcessingCompleted,
    Cancelled,
    Completed,
    Failed,
}

impl EventType {
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, EventType::Failed | EventType::FetchFailed)
    }

    #[must_use]
    pub fn is_progress(self) -> bool {
        matches!(self, EventType::FetchProgress)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub url: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub current: Option<usize>,
    pub total: Option<usize>,
    pub bytes_downloaded: Option<u64>,
    pub status_code: Option<u16>,
    pub output_path: Option<PathBuf>,
    pub content_type: Option<String>,
    pub retry_attempt: Option<u32>,
    pub duplicate_of: Option<String>,
    pub skip_reason: Option<SkipReason>,
}

impl FetchEvent {
    #[must_use]
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            url: None,
            message: None,
            error: None,
            current: None,
            total: None,
            bytes_downloaded: None,
            status_code: None,
            output_path: None,
            content_type: None,
            retry_attempt: None,
            duplicate_of: None,
            skip_reason: None,
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    #[must_use]
    pub fn with_progress(mut self, current: usize, total: usize) -> Self {
        self.current = Some(current);
        self.total = Some(total);
        self
    }

    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_skip_reason(mut self, reason: SkipReason) -> Self {
        self.skip_reason = Some(reason);
        self
    }

    #[must_use]
    pub fn with_duplicate_of(mut self, url: impl Into<String>) -> Self {
        self.duplicate_of = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_status_code(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    #[must_use]
    pub fn with_retry_attempt(mut self, attempt: u32) -> Self {
        self.retry_attempt = Some(attempt);
        self
    }

    #[must_use]
    pub fn progress_percent(&self) -> Option<f64> {
        match (self.current, self.total) {
            (Some(current), Some(total)) if total > 0 => Some((current as f64 / total as f64) * 100.0),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FetchStats {
    pub urls_discovered: usize,
    pub pages_fetched: usize,
    pub pages_skipped: usize,
    pub pages_failed: usize,
    pub pages_deduplicated: usize,
    pub pages_filtered: usize,
    pub bytes_downloaded: u64,
    pub files_saved: usize,
    pub duration_seconds: f64,
}

impl FetchStats {
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        let total = self.pages_fetched + self.pages_failed;
        if total == 0 {
            0.0
        } else {
            (self.pages_fetched as f64 / total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_percent_computes_when_both_set() {
        let event = FetchEvent::new(EventType::FetchProgress).with_progress(3, 10);
        assert_eq!(event.progress_percent(), Some(30.0));
    }

    #[test]
    fn progress_percent_none_when_total_zero() {
        let event = FetchEvent::new(EventType::FetchProgress).with_progress(0, 0);
        assert_eq!(event.progress_percent(), None);
    }

    #[test]
    fn is_error_matches_failed_variants_only() {
        assert!(EventType::Failed.is_error());
        assert!(EventType::FetchFailed.is_error());
        assert!(!EventType::FetchCompleted.is_error());
    }

    #[test]
    fn success_rate_handles_zero_total() {
        let stats = FetchStats::default();
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn success_rate_computes_percentage() {
        let stats = FetchStats {
            pages_fetched: 3,
            pages_failed: 1,
            ..Default::default()
        };
        assert_eq!(stats.success_rate(), 75.0);
    }
}
