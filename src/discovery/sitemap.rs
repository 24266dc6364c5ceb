//! Sitemap-based URL discovery, XXE-safe.
//!
//! Grounded on `original_source/src/docpull/discovery/sitemap.py`'s
//! `SitemapDiscoverer`: guesses common sitemap locations, recurses into
//! sitemap indexes up to a depth cap, and enforces a size ceiling. XML
//! parsing goes through `quick-xml`'s streaming reader, which never resolves
//! external entities, so no separate XXE mitigation is needed (SPEC_FULL.md
//! §9/§14).

use crate::http_client::HttpClient;
use crate::imurl::ImUrl;
use crate::security::UrlValidator;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::filters::{PatternFilter, SeenUrlTracker};

const MAX_SITEMAP_SIZE: usize = 50 * 1024 * 1024;
const MAX_SITEMAP_DEPTH: u32 = 5;

pub struct SitemapDiscoverer<'a> {
    client: &'a HttpClient,
    validator: &'a UrlValidator,
    filter: Option<&'a PatternFilter>,
    seen: SeenUrlTracker,
}

impl<'a> SitemapDiscoverer<'a> {
    #[must_use]
    pub fn new(client: &'a HttpClient, validator: &'a UrlValidator, filter: Option<&'a PatternFilter>) -> Self {
        Self {
            client,
            validator,
            filter,
            seen: SeenUrlTracker::new(),
        }
    }

    fn guess_sitemap_urls(start_url: &ImUrl) -> Vec<String> {
        let base = format!(
            "{}://{}",
            start_url.scheme(),
            start_url.host().unwrap_or_default()
        );
        vec![
            format!("{base}/sitemap.xml"),
            format!("{base}/sitemap_index.xml"),
            format!("{base}/sitemap/sitemap.xml"),
            format!("{base}/sitemaps/sitemap.xml"),
        ]
    }

    async fn fetch_sitemap(&self, url: &str) -> Option<String> {
        if !self.validator.is_valid(url) {
            return None;
        }
        let parsed = ImUrl::parse(url).ok()?;
        let page = self.client.get(&parsed).await.ok()?;
        if page.raw_len > MAX_SITEMAP_SIZE {
            log::warn!("sitemap too large ({} bytes): {url}", page.raw_len);
            return None;
        }
        Some(page.body)
    }

    /// Discover URLs for `start_url`, applying the validator, pattern
    /// filter, and dedup tracker, up to `max_urls` results.
    pub async fn discover(&mut self, start_url: &ImUrl, max_urls: Option<usize>) -> Vec<ImUrl> {
        self.seen.clear();
        let mut results = Vec::new();

        if start_url.path().ends_with(".xml") {
            self.discover_from(start_url.as_str(), 0, max_urls, &mut results).await;
            return results;
        }

        for candidate in Self::guess_sitemap_urls(start_url) {
            let remaining = max_urls.map(|m| m.saturating_sub(results.len()));
            if remaining == Some(0) {
                break;
            }
            self.discover_from(&candidate, 0, remaining, &mut results).await;
            if max_urls.is_some_and(|m| results.len() >= m) {
                break;
            }
        }

        if results.is_empty() {
            log::info!("no sitemap found for {start_url}");
        }
        results
    }

    fn discover_from<'f>(
        &'f self,
        sitemap_url: &'f str,
        depth: u32,
        max_urls: Option<usize>,
        results: &'f mut Vec<ImUrl>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + 'f>> {
        Box::pin(async move {
            if depth > MAX_SITEMAP_DEPTH || max_urls == Some(0) {
                return;
            }
            let Some(content) = self.fetch_sitemap(sitemap_url).await else {
                return;
            };
            let (page_urls, nested) = parse_sitemap(&content);

            for raw in page_urls {
                if max_urls.is_some_and(|m| results.len() >= m) {
                    return;
                }
                if !self.validator.is_valid(&raw) {
                    continue;
                }
                let Ok(url) = ImUrl::parse(&raw) else { continue };
                if let Some(filter) = self.filter {
                    if !filter.should_include(&url) {
                        continue;
                    }
                }
                if !self.seen.add(&url) {
                    continue;
                }
                results.push(url);
            }

            for nested_url in nested {
                if max_urls.is_some_and(|m| results.len() >= m) {
                    return;
                }
                let remaining = max_urls.map(|m| m.saturating_sub(results.len()));
                self.discover_from(&nested_url, depth + 1, remaining, results).await;
            }
        })
    }
}

/// Parse sitemap XML, returning `(page_urls, nested_sitemap_urls)`. Tolerant
/// of both namespaced (`<ns:url><ns:loc>`) and bare (`<url><loc>`) element
/// forms, matching the original's try-namespaced-then-bare fallback.
fn parse_sitemap(xml: &str) -> (Vec<String>, Vec<String>) {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text = true;

    let mut page_urls = Vec::new();
    let mut nested_urls = Vec::new();
    // Stack of local element names (namespace prefix stripped), innermost last.
    let mut stack: Vec<String> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                stack.push(local_name(&e.name().as_ref().to_vec()));
            }
            Ok(Event::Empty(_)) => {
                // Self-closing tags (e.g. <loc/>) carry no text; nothing to record.
            }
            Ok(Event::Text(t)) => {
                if stack.last().map(String::as_str) == Some("loc") {
                    let parent = stack.get(stack.len().wrapping_sub(2)).map(String::as_str);
                    if let Ok(text) = t.unescape() {
                        let text = text.trim().to_string();
                        if !text.is_empty() {
                            match parent {
                                Some("sitemap") => nested_urls.push(text),
                                _ => page_urls.push(text),
                            }
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("failed to parse sitemap XML: {e}");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    (page_urls, nested_urls)
}

fn local_name(qname: &[u8]) -> String {
    let s = String::from_utf8_lossy(qname);
    s.rsplit(':').next().unwrap_or(&s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_sitemap() {
        let xml = r#"<?xml version="1.0"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/a</loc></url>
  <url><loc>https://example.com/b</loc></url>
</urlset>"#;
        let (pages, nested) = parse_sitemap(xml);
        assert_eq!(pages, vec!["https://example.com/a", "https://example.com/b"]);
        assert!(nested.is_empty());
    }

    #[test]
    fn parses_sitemap_index() {
        let xml = r#"<?xml version="1.0"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/sitemap-1.xml</loc></sitemap>
  <sitemap><loc>https://example.com/sitemap-2.xml</loc></sitemap>
</sitemapindex>"#;
        let (pages, nested) = parse_sitemap(xml);
        assert!(pages.is_empty());
        assert_eq!(nested.len(), 2);
    }

    #[test]
    fn tolerates_namespaced_prefix() {
        let xml = r#"<?xml version="1.0"?>
<ns:urlset xmlns:ns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <ns:url><ns:loc>https://example.com/a</ns:loc></ns:url>
</ns:urlset>"#;
        let (pages, _) = parse_sitemap(xml);
        assert_eq!(pages, vec!["https://example.com/a"]);
    }
}
