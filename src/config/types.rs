//! The `FetchConfig` record: the fetch engine's language-neutral "Config".
//!
//! Field shape grounded on the teacher's `config/types.rs` (`CrawlConfig`:
//! private fields behind `pub(crate)`, constructed only through the builder)
//! and on spec.md §6's configuration groups.

use super::auth::Auth;
use super::byte_size::ByteSize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamingStrategy {
    Full,
    Short,
    Flat,
    Hierarchical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Markdown,
    Json,
    Sqlite,
}

/// The validated, immutable configuration for one fetch job.
///
/// Constructed only via [`FetchConfigBuilder`](super::builder::FetchConfigBuilder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub(crate) seed_url: String,

    // Crawl
    pub(crate) max_pages: Option<usize>,
    pub(crate) max_depth: u8,
    pub(crate) max_concurrent: usize,
    pub(crate) rate_limit: Duration,
    pub(crate) per_host_concurrent: usize,
    pub(crate) include_paths: Vec<String>,
    pub(crate) exclude_paths: Vec<String>,
    pub(crate) javascript: bool,
    pub(crate) adaptive_rate_limit: bool,
    pub(crate) allow_subdomains: bool,
    pub(crate) allowed_domains: Option<Vec<String>>,
    pub(crate) allow_private_ips: bool,

    // Content filter
    pub(crate) language: Option<String>,
    pub(crate) exclude_languages: Vec<String>,
    pub(crate) deduplicate: bool,
    pub(crate) streaming_dedup: bool,
    pub(crate) max_file_size: Option<ByteSize>,
    pub(crate) max_total_size: Option<ByteSize>,
    pub(crate) exclude_sections: Vec<String>,

    // Output
    pub(crate) output_dir: PathBuf,
    pub(crate) format: OutputFormat,
    pub(crate) naming_strategy: NamingStrategy,
    pub(crate) create_index: bool,
    pub(crate) rich_metadata: bool,
    pub(crate) add_frontmatter: bool,

    // Network
    pub(crate) proxy: Option<String>,
    pub(crate) user_agent: String,
    pub(crate) max_retries: u32,
    pub(crate) connect_timeout: Duration,
    pub(crate) read_timeout: Duration,
    pub(crate) max_response_size: ByteSize,

    // Auth
    pub(crate) auth: Auth,

    // Cache
    pub(crate) cache_enabled: bool,
    pub(crate) cache_dir: Option<PathBuf>,
    pub(crate) cache_ttl_days: Option<u32>,
    pub(crate) skip_unchanged: bool,
    pub(crate) resume: bool,

    // Operational
    pub(crate) dry_run: bool,
}

impl FetchConfig {
    #[must_use]
    pub fn seed_url(&self) -> &str {
        &self.seed_url
    }
    #[must_use]
    pub fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }
    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
    #[must_use]
    pub fn rate_limit(&self) -> Duration {
        self.rate_limit
    }
    #[must_use]
    pub fn per_host_concurrent(&self) -> usize {
        self.per_host_concurrent
    }
    #[must_use]
    pub fn include_paths(&self) -> &[String] {
        &self.include_paths
    }
    #[must_use]
    pub fn exclude_paths(&self) -> &[String] {
        &self.exclude_paths
    }
    #[must_use]
    pub fn javascript(&self) -> bool {
        self.javascript
    }
    #[must_use]
    pub fn adaptive_rate_limit(&self) -> bool {
        self.adaptive_rate_limit
    }
    #[must_use]
    pub fn allow_subdomains(&self) -> bool {
        self.allow_subdomains
    }
    #[must_use]
    pub fn allowed_domains(&self) -> Option<&[String]> {
        self.allowed_domains.as_deref()
    }
    /// Whether private/loopback/link-local IP targets are permitted.
    /// Defaults to `false` (SSRF-resistant); intended for crawling internal
    /// documentation sites on a trusted network, or for test fixtures.
    #[must_use]
    pub fn allow_private_ips(&self) -> bool {
        self.allow_private_ips
    }
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
    #[must_use]
    pub fn exclude_languages(&self) -> &[String] {
        &self.exclude_languages
    }
    #[must_use]
    pub fn deduplicate(&self) -> bool {
        self.deduplicate
    }
    #[must_use]
    pub fn streaming_dedup(&self) -> bool {
        self.streaming_dedup
    }
    #[must_use]
    pub fn max_file_size(&self) -> Option<ByteSize> {
        self.max_file_size
    }
    #[must_use]
    pub fn max_total_size(&self) -> Option<ByteSize> {
        self.max_total_size
    }
    #[must_use]
    pub fn exclude_sections(&self) -> &[String] {
        &self.exclude_sections
    }
    #[must_use]
    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }
    #[must_use]
    pub fn naming_strategy(&self) -> NamingStrategy {
        self.naming_strategy
    }
    #[must_use]
    pub fn rich_metadata(&self) -> bool {
        self.rich_metadata
    }
    #[must_use]
    pub fn add_frontmatter(&self) -> bool {
        self.add_frontmatter
    }
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }
    #[must_use]
    pub fn max_response_size(&self) -> ByteSize {
        self.max_response_size
    }
    #[must_use]
    pub fn auth(&self) -> &Auth {
        &self.auth
    }
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }
    #[must_use]
    pub fn cache_dir(&self) -> Option<&std::path::Path> {
        self.cache_dir.as_deref()
    }
    #[must_use]
    pub fn cache_ttl_days(&self) -> Option<u32> {
        self.cache_ttl_days
    }
    #[must_use]
    pub fn skip_unchanged(&self) -> bool {
        self.skip_unchanged
    }
    #[must_use]
    pub fn resume(&self) -> bool {
        self.resume
    }
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
    #[must_use]
    pub fn create_index(&self) -> bool {
        self.create_index
    }
}
