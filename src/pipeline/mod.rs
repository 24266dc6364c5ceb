//! The per-page fetch pipeline: validate, fetch, extract, convert, dedup, save.
//!
//! Grounded on `original_source/src/docpull/pipeline/base.py`'s `PageContext`
//! dataclass and `FetchPipeline` driver. The Python original drives a
//! `Protocol`-typed list of steps (`FetchStep`); the pack carries no
//! `async-trait` dependency (confirmed absent from every example repo), and
//! async fns in traits aren't object-safe without it, so this is a concrete
//! struct calling a fixed, ordered sequence of step functions instead of a
//! `Vec<Box<dyn FetchStep>>`. The `should_skip` short-circuit and
//! exception-to-`error` capture behavior are preserved exactly.

pub mod steps;

use crate::cache::{CacheManager, StreamingDeduplicator};
use crate::config::FetchConfig;
use crate::events::{EventType, FetchEvent, SkipReason};
use crate::http_client::HttpClient;
use crate::imurl::ImUrl;
use crate::metadata::PageMetadata;
use crate::security::robots::RobotsChecker;
use crate::security::url_validator::UrlValidator;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

/// Broadcasts [`FetchEvent`]s to any number of subscribers. Grounded on the
/// teacher's `crawl_events::bus::CrawlEventBus`, stripped down to the one
/// primitive this pipeline needs: a shared broadcast channel. Sends are
/// best-effort — a run with no subscribers is not an error.
#[derive(Clone)]
pub struct EventSink(broadcast::Sender<FetchEvent>);

impl EventSink {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self(tx)
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FetchEvent> {
        self.0.subscribe()
    }

    pub fn emit(&self, event: FetchEvent) {
        let _ = self.0.send(event);
    }
}

impl Default for EventSink {
    fn default() -> Self {
        Self::new(1024)
    }
}

/// One page's state as it moves through the pipeline. Mirrors the Python
/// original's `PageContext` field-for-field, with `metadata` typed as the
/// crate's [`PageMetadata`] rather than a loose dict.
pub struct PageContext {
    pub url: ImUrl,
    pub depth: u8,
    pub output_path: PathBuf,

    pub html: Option<String>,
    pub markdown: Option<String>,
    pub title: Option<String>,
    pub metadata: PageMetadata,

    pub status_code: Option<u16>,
    pub content_type: Option<String>,
    pub bytes_downloaded: u64,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    pub content_hash: Option<String>,

    pub should_skip: bool,
    pub skip_reason: Option<SkipReason>,
    pub error: Option<String>,
}

impl PageContext {
    #[must_use]
    pub fn new(url: ImUrl, depth: u8, output_path: PathBuf) -> Self {
        Self {
            url,
            depth,
            output_path,
            html: None,
            markdown: None,
            title: None,
            metadata: PageMetadata::default(),
            status_code: None,
            content_type: None,
            bytes_downloaded: 0,
            etag: None,
            last_modified: None,
            content_hash: None,
            should_skip: false,
            skip_reason: None,
            error: None,
        }
    }

    pub fn skip(&mut self, reason: SkipReason) {
        self.should_skip = true;
        self.skip_reason = Some(reason);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.should_skip = true;
        self.error = Some(message.into());
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.markdown.as_deref().or(self.html.as_deref())
    }
}

/// Shared, cross-page services the pipeline's steps draw on. One instance is
/// built by the orchestrator and cloned (cheaply, via `Arc`) per page.
#[derive(Clone)]
pub struct PipelineDeps {
    pub config: Arc<FetchConfig>,
    pub validator: Arc<UrlValidator>,
    pub robots: Arc<RobotsChecker>,
    pub http: Arc<HttpClient>,
    pub cache: Option<Arc<Mutex<CacheManager>>>,
    pub dedup: Option<Arc<StreamingDeduplicator>>,
    pub events: EventSink,
    pub json_sink: Option<Arc<Mutex<steps::save_json::JsonSink>>>,
    pub sqlite_sink: Option<Arc<steps::save_sqlite::SqliteSink>>,
}

/// Drives a single URL through the fixed step sequence, short-circuiting as
/// soon as a step sets `should_skip`.
pub struct FetchPipeline {
    deps: PipelineDeps,
}

impl FetchPipeline {
    #[must_use]
    pub fn new(deps: PipelineDeps) -> Self {
        Self { deps }
    }

    pub async fn run(&self, url: ImUrl, depth: u8) -> PageContext {
        let output_path = crate::naming::output_path(
            self.deps.config.naming_strategy(),
            &url,
            Some(&ImUrl::parse(self.deps.config.seed_url()).unwrap_or_else(|_| url.clone())),
            self.deps.config.output_dir(),
        );
        let mut ctx = PageContext::new(url, depth, output_path);

        self.deps.events.emit(
            FetchEvent::new(EventType::FetchStarted).with_url(ctx.url.as_str()),
        );

        steps::validate::run(&self.deps, &mut ctx).await;
        if !ctx.should_skip {
            steps::fetch::run(&self.deps, &mut ctx).await;
        }
        if !ctx.should_skip {
            steps::metadata::run(&self.deps, &mut ctx);
        }
        if !ctx.should_skip {
            steps::convert::run(&self.deps, &mut ctx);
        }
        if !ctx.should_skip {
            steps::dedup::run(&self.deps, &mut ctx).await;
        }
        if !ctx.should_skip {
            match self.deps.config.format() {
                crate::config::OutputFormat::Markdown => steps::save::run(&self.deps, &mut ctx).await,
                crate::config::OutputFormat::Json => steps::save_json::run(&self.deps, &mut ctx).await,
                crate::config::OutputFormat::Sqlite => steps::save_sqlite::run(&self.deps, &mut ctx).await,
            }
        }

        if let Some(error) = ctx.error.clone() {
            self.deps.events.emit(
                FetchEvent::new(EventType::FetchFailed)
                    .with_url(ctx.url.as_str())
                    .with_error(error),
            );
        } else if let Some(reason) = ctx.skip_reason {
            self.deps.events.emit(
                FetchEvent::new(EventType::FetchSkipped)
                    .with_url(ctx.url.as_str())
                    .with_skip_reason(reason),
            );
        } else {
            self.deps.events.emit(
                FetchEvent::new(EventType::FetchCompleted)
                    .with_url(ctx.url.as_str())
                    .with_output_path(ctx.output_path.clone()),
            );
        }

        ctx
    }
}
