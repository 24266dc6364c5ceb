//! Breadth-first link-crawling URL discovery, the fallback strategy when a
//! sitemap yields too few URLs.
//!
//! Grounded on `original_source/src/docpull/discovery/crawler.py`'s
//! `LinkCrawler`: BFS queue of `(url, depth)`, same-domain restriction,
//! robots.txt + validator + pattern-filter gating, fragment stripping on
//! discovered links.

use crate::http_client::HttpClient;
use crate::imurl::ImUrl;
use crate::security::{RobotsChecker, UrlValidator};
use scraper::{Html, Selector};
use std::collections::VecDeque;

use super::filters::{DomainFilter, PatternFilter, SeenUrlTracker};

pub struct LinkCrawler<'a> {
    client: &'a HttpClient,
    validator: &'a UrlValidator,
    robots: &'a RobotsChecker,
    max_depth: u32,
    filter: Option<&'a PatternFilter>,
    stay_on_domain: bool,
    seen: SeenUrlTracker,
}

impl<'a> LinkCrawler<'a> {
    #[must_use]
    pub fn new(
        client: &'a HttpClient,
        validator: &'a UrlValidator,
        robots: &'a RobotsChecker,
        max_depth: u32,
        filter: Option<&'a PatternFilter>,
        stay_on_domain: bool,
    ) -> Self {
        Self {
            client,
            validator,
            robots,
            max_depth,
            filter,
            stay_on_domain,
            seen: SeenUrlTracker::new(),
        }
    }

    fn extract_links(html: &str, base: &ImUrl) -> Vec<ImUrl> {
        let document = Html::parse_document(html);
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };
        document
            .select(&selector)
            .filter_map(|el| el.value().attr("href"))
            .filter(|href| !href.is_empty() && !href.starts_with('#') && !href.starts_with("javascript:"))
            .filter_map(|href| resolve_and_clean(base, href))
            .collect()
    }

    async fn fetch_html(&self, url: &ImUrl) -> Option<String> {
        let page = self.client.get(url).await.ok()?;
        if !page.status.is_success() {
            return None;
        }
        let content_type = page.content_type.as_deref().unwrap_or("");
        if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
            return None;
        }
        Some(page.body)
    }

    async fn should_crawl(&self, url: &ImUrl, domain_filter: Option<&DomainFilter>) -> bool {
        if !self.validator.is_valid(url.as_str()) {
            return false;
        }
        if !self.robots.is_allowed(url).await {
            return false;
        }
        if let Some(domain_filter) = domain_filter {
            if !domain_filter.should_include(url) {
                return false;
            }
        }
        self.filter.is_none_or(|f| f.should_include(url))
    }

    /// Discover URLs starting from `start_url`, breadth-first, up to
    /// `max_urls` results and `max_depth` hops (falling back to the
    /// instance default when `None`).
    pub async fn discover(
        &mut self,
        start_url: &ImUrl,
        max_urls: Option<usize>,
        max_depth: Option<u32>,
    ) -> Vec<ImUrl> {
        self.seen.clear();
        let domain_filter = self
            .stay_on_domain
            .then(|| DomainFilter::new(start_url, false, Default::default()));
        let effective_max_depth = max_depth.unwrap_or(self.max_depth);

        let mut queue: VecDeque<(ImUrl, u32)> = VecDeque::new();
        queue.push_back((start_url.clone(), 0));
        self.seen.add(start_url);

        let mut results = Vec::new();

        if self.should_crawl(start_url, domain_filter.as_ref()).await {
            results.push(start_url.clone());
            if max_urls.is_some_and(|m| results.len() >= m) {
                return results;
            }
        }

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= effective_max_depth {
                continue;
            }
            let Some(html) = self.fetch_html(&current).await else {
                continue;
            };
            let links = Self::extract_links(&html, &current);
            log::debug!("found {} links on {current}", links.len());

            for link in links {
                if !self.seen.add(&link) {
                    continue;
                }
                if !self.should_crawl(&link, domain_filter.as_ref()).await {
                    continue;
                }
                results.push(link.clone());
                if max_urls.is_some_and(|m| results.len() >= m) {
                    return results;
                }
                if depth + 1 < effective_max_depth {
                    queue.push_back((link, depth + 1));
                }
            }
        }

        log::info!("crawl complete: found {} URLs", results.len());
        results
    }
}

fn resolve_and_clean(base: &ImUrl, href: &str) -> Option<ImUrl> {
    let base_url: &url::Url = base.as_ref();
    let mut resolved = base_url.join(href).ok()?;
    resolved.set_fragment(None);
    ImUrl::parse(resolved.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_links_resolves_relative_urls() {
        let base = ImUrl::parse("https://example.com/docs/").unwrap();
        let html = r#"<html><body>
            <a href="guide">Guide</a>
            <a href="/api">API</a>
            <a href="https://other.com/x">Other</a>
            <a href="#section">Anchor</a>
            <a href="javascript:void(0)">JS</a>
        </body></html>"#;
        let links: Vec<String> = LinkCrawler::extract_links(html, &base)
            .into_iter()
            .map(|u| u.to_string())
            .collect();
        assert!(links.contains(&"https://example.com/docs/guide".to_string()));
        assert!(links.contains(&"https://example.com/api".to_string()));
        assert!(links.contains(&"https://other.com/x".to_string()));
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn resolve_and_clean_strips_fragment() {
        let base = ImUrl::parse("https://example.com/").unwrap();
        let resolved = resolve_and_clean(&base, "/page#section").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/page");
    }
}
