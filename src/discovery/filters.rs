//! URL filtering and seen-tracking for discovery.
//!
//! Grounded on `original_source/src/docpull/discovery/filters.py`:
//! `PatternFilter` (glob include/exclude), `DomainFilter` (subdomain-aware
//! allowlist), `CompositeFilter` (AND of multiple filters), `SeenUrlTracker`
//! (dedup via canonicalization, using [`ImUrl::canonical`] here instead of
//! the original's ad hoc `normalize_url`/`url_normalize`).

use crate::imurl::ImUrl;
use dashmap::DashSet;
use regex::Regex;
use std::collections::HashSet;

const REGEX_META: &[char] = &[
    '.', '+', '(', ')', '|', '[', ']', '{', '}', '^', '$', '\\',
];

/// Compile an `fnmatch`-style glob (`*`, `?`) into an anchored regex.
fn glob_to_regex(pattern: &str) -> Option<Regex> {
    let mut out = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            c if REGEX_META.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push('$');
    Regex::new(&out).ok()
}

/// Include/exclude URLs by glob pattern matched against the URL path.
pub struct PatternFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl PatternFilter {
    #[must_use]
    pub fn new(include_patterns: &[String], exclude_patterns: &[String]) -> Self {
        Self {
            include: include_patterns.iter().filter_map(|p| glob_to_regex(p)).collect(),
            exclude: exclude_patterns.iter().filter_map(|p| glob_to_regex(p)).collect(),
        }
    }

    #[must_use]
    pub fn should_include(&self, url: &ImUrl) -> bool {
        let path = url.path();
        if !self.include.is_empty() && !self.include.iter().any(|r| r.is_match(path)) {
            return false;
        }
        !self.exclude.iter().any(|r| r.is_match(path))
    }
}

/// Restrict discovery to a base domain, with optional subdomain and
/// additional-domain allowances.
pub struct DomainFilter {
    base_domain: String,
    allow_subdomains: bool,
    additional_domains: HashSet<String>,
}

impl DomainFilter {
    #[must_use]
    pub fn new(base_url: &ImUrl, allow_subdomains: bool, additional_domains: HashSet<String>) -> Self {
        Self {
            base_domain: base_url.host().unwrap_or_default().to_ascii_lowercase(),
            allow_subdomains,
            additional_domains: additional_domains.into_iter().map(|d| d.to_ascii_lowercase()).collect(),
        }
    }

    #[must_use]
    pub fn should_include(&self, url: &ImUrl) -> bool {
        let Some(host) = url.host() else { return false };
        let host = host.to_ascii_lowercase();
        if host == self.base_domain || self.additional_domains.contains(&host) {
            return true;
        }
        self.allow_subdomains && host.ends_with(&format!(".{}", self.base_domain))
    }
}

/// AND-combination of zero or more boxed filter predicates.
#[derive(Default)]
pub struct CompositeFilter {
    filters: Vec<Box<dyn Fn(&ImUrl) -> bool + Send + Sync>>,
}

impl CompositeFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, filter: impl Fn(&ImUrl) -> bool + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    #[must_use]
    pub fn should_include(&self, url: &ImUrl) -> bool {
        self.filters.iter().all(|f| f(url))
    }
}

/// Thread-safe set of canonicalized URLs seen so far during one discovery run.
#[derive(Default)]
pub struct SeenUrlTracker {
    seen: DashSet<String>,
}

impl SeenUrlTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `url`. Returns `true` if it was not already present.
    pub fn add(&self, url: &ImUrl) -> bool {
        let canonical = url.canonical().map(|u| u.to_string()).unwrap_or_else(|_| url.to_string());
        self.seen.insert(canonical)
    }

    #[must_use]
    pub fn contains(&self, url: &ImUrl) -> bool {
        let canonical = url.canonical().map(|u| u.to_string()).unwrap_or_else(|_| url.to_string());
        self.seen.contains(&canonical)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_filter_include_restricts_to_matches() {
        let filter = PatternFilter::new(&["/docs/*".to_string()], &[]);
        assert!(filter.should_include(&ImUrl::parse("https://example.com/docs/guide").unwrap()));
        assert!(!filter.should_include(&ImUrl::parse("https://example.com/blog/post").unwrap()));
    }

    #[test]
    fn pattern_filter_exclude_removes_matches() {
        let filter = PatternFilter::new(&[], &["/docs/internal/*".to_string()]);
        assert!(!filter.should_include(&ImUrl::parse("https://example.com/docs/internal/secret").unwrap()));
        assert!(filter.should_include(&ImUrl::parse("https://example.com/docs/guide").unwrap()));
    }

    #[test]
    fn domain_filter_allows_subdomains_when_enabled() {
        let base = ImUrl::parse("https://docs.example.com").unwrap();
        let filter = DomainFilter::new(&base, true, HashSet::new());
        assert!(filter.should_include(&ImUrl::parse("https://docs.example.com/page").unwrap()));
        assert!(filter.should_include(&ImUrl::parse("https://api.docs.example.com/page").unwrap()));
        assert!(!filter.should_include(&ImUrl::parse("https://example.com/page").unwrap()));
    }

    #[test]
    fn seen_tracker_dedups_by_canonical_form() {
        let tracker = SeenUrlTracker::new();
        assert!(tracker.add(&ImUrl::parse("https://Example.com/path#frag").unwrap()));
        assert!(!tracker.add(&ImUrl::parse("https://example.com/path").unwrap()));
    }
}
