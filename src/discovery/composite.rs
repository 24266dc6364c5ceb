//! Composite discovery: sitemap first, link-crawl fallback.
//!
//! Grounded on `original_source/src/docpull/discovery/composite.py`'s
//! `CompositeDiscoverer`: tries the sitemap discoverer, and only falls back
//! to crawling when the sitemap yields fewer than `fallback_threshold` URLs.
//! Deduplicates across both strategies with a single [`SeenUrlTracker`].

use crate::imurl::ImUrl;

use super::crawler::LinkCrawler;
use super::filters::SeenUrlTracker;
use super::sitemap::SitemapDiscoverer;

pub struct CompositeDiscoverer<'a> {
    sitemap: SitemapDiscoverer<'a>,
    crawler: Option<LinkCrawler<'a>>,
    fallback_threshold: usize,
}

impl<'a> CompositeDiscoverer<'a> {
    #[must_use]
    pub fn new(
        sitemap: SitemapDiscoverer<'a>,
        crawler: Option<LinkCrawler<'a>>,
        fallback_threshold: usize,
    ) -> Self {
        Self {
            sitemap,
            crawler,
            fallback_threshold,
        }
    }

    /// Discover URLs for `start_url`, deduplicated across both strategies,
    /// capped at `max_urls`.
    pub async fn discover(&mut self, start_url: &ImUrl, max_urls: Option<usize>) -> Vec<ImUrl> {
        if max_urls == Some(0) {
            return Vec::new();
        }

        let seen = SeenUrlTracker::new();
        let mut results = Vec::new();

        let sitemap_urls = self.sitemap.discover(start_url, max_urls).await;
        let sitemap_count = sitemap_urls.len();
        for url in sitemap_urls {
            if !seen.add(&url) {
                continue;
            }
            results.push(url);
            if max_urls.is_some_and(|m| results.len() >= m) {
                log::info!("discovery complete: {} URLs from sitemap", results.len());
                return results;
            }
        }

        let Some(crawler) = &mut self.crawler else {
            log::info!("discovery complete: {} URLs (no crawler configured)", results.len());
            return results;
        };

        if sitemap_count >= self.fallback_threshold {
            log::info!(
                "discovery complete: {} URLs from sitemap (above threshold {})",
                results.len(),
                self.fallback_threshold
            );
            return results;
        }

        log::debug!(
            "sitemap yielded {sitemap_count} URLs (below threshold {}), falling back to crawling",
            self.fallback_threshold
        );

        let remaining = max_urls.map(|m| m.saturating_sub(results.len()));
        let crawled = crawler.discover(start_url, remaining, None).await;
        for url in crawled {
            if !seen.add(&url) {
                continue;
            }
            results.push(url);
            if max_urls.is_some_and(|m| results.len() >= m) {
                break;
            }
        }

        log::info!("discovery complete: {} total URLs", results.len());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::crawler::LinkCrawler;
    use crate::discovery::sitemap::SitemapDiscoverer;
    use crate::http_client::HttpClient;
    use crate::security::{RobotsChecker, UrlValidator};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn client(url: &str) -> HttpClient {
        let config = crate::config::FetchConfigBuilder::new(url)
            .output_dir(PathBuf::from("/tmp/out"))
            .allow_private_ips(true)
            .max_retries(1)
            .build()
            .unwrap();
        HttpClient::new(&config, Arc::new(crate::rate_limiter::PerHostRateLimiter::default())).unwrap()
    }

    #[tokio::test]
    async fn max_urls_zero_short_circuits_without_any_http_call() {
        // No mocks registered: any HTTP call the discoverer made would panic.
        let server = mockito::Server::new_async().await;
        let http = client(&server.url());
        let validator = UrlValidator::new(
            std::collections::HashSet::from(["http".to_string()]),
            None,
        )
        .allow_private_ips();
        let robots = RobotsChecker::new("test-agent", std::time::Duration::from_secs(1));
        let start = ImUrl::parse(&server.url()).unwrap();

        let sitemap = SitemapDiscoverer::new(&http, &validator, None);
        let crawler = LinkCrawler::new(&http, &validator, &robots, 3, None, true);
        let mut composite = CompositeDiscoverer::new(sitemap, Some(crawler), 10);

        let results = composite.discover(&start, Some(0)).await;
        assert!(results.is_empty());
    }
}
