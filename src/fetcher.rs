//! The top-level orchestrator: discovers URLs, fans them out through the
//! fetch pipeline with bounded concurrency, and streams progress events.
//!
//! Grounded on `original_source/src/docpull/fetcher.py`'s `Fetcher` (scoped
//! component construction, discover-then-fetch main run, resume-list
//! persistence) and on the teacher's `crawl_engine::orchestrator::crawl_pages`
//! for the bounded-concurrency task-set shape (`Semaphore` + `FuturesUnordered`
//! so a URL's completion immediately frees a slot for the next one). The
//! teacher drives a `VecDeque` queue fed during the crawl (browser-rendered,
//! depth-expanding); this orchestrator's URL list is fixed up front by the
//! composite discoverer, so the queue is a flat `Vec` instead.

use crate::cache::{CacheManager, StreamingDeduplicator};
use crate::config::FetchConfig;
use crate::discovery::{CompositeDiscoverer, LinkCrawler, PatternFilter, SitemapDiscoverer};
use crate::error::{FetchError, FetchResult};
use crate::events::{EventType, FetchEvent, FetchStats, SkipReason};
use crate::http_client::HttpClient;
use crate::imurl::ImUrl;
use crate::pipeline::steps::save_json::JsonSink;
use crate::pipeline::steps::save_sqlite::SqliteSink;
use crate::pipeline::{EventSink, FetchPipeline, PipelineDeps};
use crate::rate_limiter::PerHostRateLimiter;
use crate::security::robots::RobotsChecker;
use crate::security::url_validator::UrlValidator;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{broadcast, Mutex, Semaphore};

/// Sitemap-vs-crawl fallback threshold: a sitemap yielding fewer URLs than
/// this is treated as absent and the link crawler takes over. Grounded on
/// `original_source/src/docpull/discovery/composite.py`'s default.
const FALLBACK_THRESHOLD: usize = 5;

pub struct Fetcher {
    config: Arc<FetchConfig>,
    deps: PipelineDeps,
    cache: Option<Arc<Mutex<CacheManager>>>,
    cancelled: Arc<AtomicBool>,
    stats: Arc<Mutex<FetchStats>>,
}

impl Fetcher {
    /// Construct every scoped component the run needs: rate limiter, HTTP
    /// client, validator, robots checker, cache, deduplicator, and the
    /// format-appropriate output sink.
    pub async fn new(config: FetchConfig) -> FetchResult<Self> {
        let config = Arc::new(config);

        let mut limiter = PerHostRateLimiter::new(config.rate_limit(), config.per_host_concurrent());
        if config.adaptive_rate_limit() {
            limiter = limiter.adaptive();
        }
        let limiter = Arc::new(limiter);

        let http = Arc::new(HttpClient::new(&config, Arc::clone(&limiter))?);

        let allowed_schemes = HashSet::from(["http".to_string(), "https".to_string()]);
        let allowed_domains = config.allowed_domains().map(|d| d.iter().cloned().collect());
        let mut validator = UrlValidator::new(allowed_schemes, allowed_domains);
        if config.allow_private_ips() {
            validator = validator.allow_private_ips();
        }
        let validator = Arc::new(validator);

        let robots = Arc::new(RobotsChecker::new(config.user_agent().to_string(), config.connect_timeout()));

        let cache = if config.cache_enabled() {
            let dir = config
                .cache_dir()
                .map(std::path::Path::to_path_buf)
                .unwrap_or_else(|| config.output_dir().join(".citescrape-cache"));
            Some(Arc::new(Mutex::new(CacheManager::open(dir, config.cache_ttl_days()).await?)))
        } else {
            None
        };

        let dedup = if config.streaming_dedup() {
            Some(Arc::new(StreamingDeduplicator::new()))
        } else {
            None
        };

        let json_sink = if matches!(config.format(), crate::config::OutputFormat::Json) {
            let path = config.output_dir().join("pages.json");
            Some(Arc::new(Mutex::new(JsonSink::create(path).await?)))
        } else {
            None
        };

        let sqlite_sink = if matches!(config.format(), crate::config::OutputFormat::Sqlite) {
            let path = config.output_dir().join("pages.sqlite");
            Some(Arc::new(SqliteSink::open(&path).await?))
        } else {
            None
        };

        let deps = PipelineDeps {
            config: Arc::clone(&config),
            validator,
            robots,
            http,
            cache: cache.clone(),
            dedup,
            events: EventSink::default(),
            json_sink,
            sqlite_sink,
        };

        Ok(Self {
            config,
            deps,
            cache,
            cancelled: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(Mutex::new(FetchStats::default())),
        })
    }

    /// Subscribe to the event stream. Call before [`Fetcher::run`] to avoid
    /// missing early events (`started`, `discovery_started`).
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<FetchEvent> {
        self.deps.events.subscribe()
    }

    /// Request cancellation. Checked at discovery and between pipeline runs;
    /// the in-flight fetch is allowed to finish.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub async fn stats(&self) -> FetchStats {
        *self.stats.lock().await
    }

    /// Run the composite discoverer alone, without fetching anything.
    pub async fn discover(&self) -> FetchResult<Vec<ImUrl>> {
        let seed = ImUrl::parse(self.config.seed_url())?;

        let filter = PatternFilter::new(self.config.include_paths(), self.config.exclude_paths());

        let sitemap = SitemapDiscoverer::new(&self.deps.http, &self.deps.validator, Some(&filter));
        let crawler = LinkCrawler::new(
            &self.deps.http,
            &self.deps.validator,
            &self.deps.robots,
            u32::from(self.config.max_depth()),
            Some(&filter),
            true,
        );
        let mut composite = CompositeDiscoverer::new(sitemap, Some(crawler), FALLBACK_THRESHOLD);
        Ok(composite.discover(&seed, self.config.max_pages()).await)
    }

    /// Discover, then fetch every URL through the pipeline with bounded
    /// concurrency, emitting events throughout.
    pub async fn run(&self) -> FetchResult<FetchStats> {
        let start = Instant::now();
        self.deps.events.emit(FetchEvent::new(EventType::Started));

        let urls = match self.load_resume_list().await {
            Some(pending) => {
                self.deps.events.emit(FetchEvent::new(EventType::Resumed).with_message(format!("{} pending URLs", pending.len())));
                pending
            }
            None => {
                self.deps.events.emit(FetchEvent::new(EventType::DiscoveryStarted));
                if self.cancelled.load(Ordering::SeqCst) {
                    self.deps.events.emit(FetchEvent::new(EventType::Cancelled));
                    return Ok(self.stats().await);
                }
                let discovered = self.discover().await?;
                if let Some(cache) = &self.cache {
                    cache
                        .lock()
                        .await
                        .save_discovered_urls(discovered.iter().map(|u| u.as_str().to_string()));
                }
                self.deps.events.emit(
                    FetchEvent::new(EventType::DiscoveryComplete).with_message(format!("{} URLs", discovered.len())),
                );
                discovered
            }
        };

        {
            let mut stats = self.stats.lock().await;
            stats.urls_discovered = urls.len();
        }

        let total = urls.len();
        let concurrency = self.config.max_concurrent().max(1);
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut active = FuturesUnordered::new();
        let mut remaining: std::collections::VecDeque<(usize, ImUrl)> = urls.into_iter().enumerate().collect();
        let mut completed = 0usize;
        let mut any_failed = false;

        loop {
            while active.len() < concurrency {
                if self.cancelled.load(Ordering::SeqCst) {
                    break;
                }
                let Some((index, url)) = remaining.pop_front() else { break };

                self.deps.events.emit(FetchEvent::new(EventType::FetchProgress).with_progress(index + 1, total));

                if self.config.dry_run() {
                    let output_path = crate::naming::output_path(
                        self.config.naming_strategy(),
                        &url,
                        Some(&ImUrl::parse(self.config.seed_url()).unwrap_or_else(|_| url.clone())),
                        self.config.output_dir(),
                    );
                    self.deps.events.emit(
                        FetchEvent::new(EventType::FetchSkipped)
                            .with_url(url.as_str())
                            .with_skip_reason(SkipReason::DryRun)
                            .with_output_path(output_path),
                    );
                    completed += 1;
                    let mut stats = self.stats.lock().await;
                    stats.pages_skipped += 1;
                    continue;
                }

                let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else { break };
                let pipeline = FetchPipeline::new(self.deps.clone());
                // The composite discoverer returns a flat URL list with no
                // per-URL depth (unlike the BFS link crawler it may fall back
                // to); every page is fetched at depth 0.
                let task = tokio::spawn(async move {
                    let _permit = permit;
                    pipeline.run(url, 0).await
                });
                active.push(task);
            }

            if active.is_empty() {
                break;
            }

            match active.next().await {
                Some(Ok(ctx)) => {
                    completed += 1;
                    let mut stats = self.stats.lock().await;
                    if ctx.error.is_some() {
                        stats.pages_failed += 1;
                        any_failed = true;
                        if let Some(cache) = &self.cache {
                            cache.lock().await.mark_failed(ctx.url.as_str());
                        }
                    } else if ctx.should_skip {
                        match ctx.skip_reason {
                            Some(SkipReason::DuplicateContent) => stats.pages_deduplicated += 1,
                            Some(SkipReason::PatternExcluded) => stats.pages_filtered += 1,
                            _ => stats.pages_skipped += 1,
                        }
                    } else {
                        stats.pages_fetched += 1;
                        stats.bytes_downloaded += ctx.bytes_downloaded;
                        stats.files_saved += 1;
                    }
                }
                Some(Err(join_err)) => {
                    return Err(FetchError::Construction(format!("fetch task panicked: {join_err}")));
                }
                None => break,
            }

            if self.cancelled.load(Ordering::SeqCst) && remaining.is_empty() && active.is_empty() {
                break;
            }
        }

        if self.cancelled.load(Ordering::SeqCst) && completed < total {
            self.deps.events.emit(FetchEvent::new(EventType::Cancelled));
            let mut stats = self.stats.lock().await;
            stats.duration_seconds = start.elapsed().as_secs_f64();
            return Ok(*stats);
        }

        if !any_failed {
            if let Some(cache) = &self.cache {
                cache.lock().await.clear_discovered_urls();
            }
        }
        if let Some(cache) = &self.cache {
            cache.lock().await.flush().await?;
        }

        let mut stats = self.stats.lock().await;
        stats.duration_seconds = start.elapsed().as_secs_f64();
        let stats = *stats;
        self.deps.events.emit(
            FetchEvent::new(EventType::Completed)
                .with_message(format!("{} fetched, {} failed", stats.pages_fetched, stats.pages_failed)),
        );
        Ok(stats)
    }

    async fn load_resume_list(&self) -> Option<Vec<ImUrl>> {
        if !self.config.resume() {
            return None;
        }
        let cache = self.cache.as_ref()?;
        let pending = cache.lock().await.get_pending_urls();
        if pending.is_empty() {
            return None;
        }
        let mut urls: Vec<ImUrl> = pending.into_iter().filter_map(|u| ImUrl::parse(&u).ok()).collect();
        if let Some(max_pages) = self.config.max_pages() {
            urls.truncate(max_pages);
        }
        Some(urls)
    }

    /// Finalize streaming sinks (JSON array close + atomic rename). Consumes
    /// `self` because [`crate::pipeline::steps::save_json::JsonSink::finalize`]
    /// takes the sink by value; callers invoke this once after the last
    /// [`Fetcher::run`] call.
    pub async fn finalize(self) -> FetchResult<()> {
        if let Some(sink) = self.deps.json_sink {
            let sink = Arc::try_unwrap(sink)
                .map_err(|_| FetchError::Construction("json sink still shared".into()))?
                .into_inner();
            sink.finalize().await?;
        }
        Ok(())
    }
}
