//! Validating builder for [`FetchConfig`].
//!
//! Grounded on the teacher's `config/builder.rs` (glob-to-regex compilation
//! performed once at build time, not in hot paths) but dropping its typestate
//! pattern: every field here is `Option<T>` so [`Profile::apply`] can fill in
//! defaults without knowing whether the caller already set a value, and so
//! that "user-explicit values always win" holds regardless of call order
//! (SPEC_FULL.md §9 decision 2).

use super::auth::Auth;
use super::byte_size::ByteSize;
use super::profiles::Profile;
use super::types::{FetchConfig, NamingStrategy, OutputFormat};
use crate::error::FetchError;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

/// Compile a glob pattern (`*` matches any sequence) into an anchored regex.
/// Done once at build time so the hot path never recompiles a pattern.
fn compile_glob_pattern(pattern: &str) -> Result<Regex, FetchError> {
    let regex_pattern = pattern.replace('*', ".*");
    let anchored = format!("^{regex_pattern}$");
    Regex::new(&anchored).map_err(|e| FetchError::Config(format!("invalid pattern '{pattern}': {e}")))
}

#[derive(Debug, Default)]
pub struct FetchConfigBuilder {
    pub(super) seed_url: Option<String>,

    pub(super) max_pages: Option<usize>,
    pub(super) max_depth: Option<u8>,
    pub(super) max_concurrent: Option<usize>,
    pub(super) rate_limit: Option<Duration>,
    pub(super) per_host_concurrent: Option<usize>,
    pub(super) include_paths: Option<Vec<String>>,
    pub(super) exclude_paths: Option<Vec<String>>,
    pub(super) javascript: Option<bool>,
    pub(super) adaptive_rate_limit: Option<bool>,
    pub(super) allow_subdomains: Option<bool>,
    pub(super) allowed_domains: Option<Vec<String>>,
    pub(super) allow_private_ips: Option<bool>,

    pub(super) language: Option<String>,
    pub(super) exclude_languages: Option<Vec<String>>,
    pub(super) deduplicate: Option<bool>,
    pub(super) streaming_dedup: Option<bool>,
    pub(super) max_file_size: Option<ByteSize>,
    pub(super) max_total_size: Option<ByteSize>,
    pub(super) exclude_sections: Option<Vec<String>>,

    pub(super) output_dir: Option<PathBuf>,
    pub(super) format: Option<OutputFormat>,
    pub(super) naming_strategy: Option<NamingStrategy>,
    pub(super) create_index: Option<bool>,
    pub(super) rich_metadata: Option<bool>,
    pub(super) add_frontmatter: Option<bool>,

    pub(super) proxy: Option<String>,
    pub(super) user_agent: Option<String>,
    pub(super) max_retries: Option<u32>,
    pub(super) connect_timeout: Option<Duration>,
    pub(super) read_timeout: Option<Duration>,
    pub(super) max_response_size: Option<ByteSize>,

    pub(super) auth: Option<Auth>,

    pub(super) cache_enabled: Option<bool>,
    pub(super) cache_dir: Option<PathBuf>,
    pub(super) cache_ttl_days: Option<u32>,
    pub(super) skip_unchanged: Option<bool>,
    pub(super) resume: Option<bool>,

    pub(super) dry_run: Option<bool>,
}

macro_rules! with_field {
    ($name:ident, $ty:ty) => {
        #[must_use]
        pub fn $name(mut self, value: $ty) -> Self {
            self.$name = Some(value);
            self
        }
    };
}

impl FetchConfigBuilder {
    #[must_use]
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: Some(seed_url.into()),
            ..Self::default()
        }
    }

    with_field!(max_pages, usize);
    with_field!(max_depth, u8);
    with_field!(max_concurrent, usize);
    with_field!(rate_limit, Duration);
    with_field!(per_host_concurrent, usize);
    with_field!(include_paths, Vec<String>);
    with_field!(exclude_paths, Vec<String>);
    with_field!(javascript, bool);
    with_field!(adaptive_rate_limit, bool);
    with_field!(allow_subdomains, bool);
    with_field!(allowed_domains, Vec<String>);
    with_field!(allow_private_ips, bool);
    with_field!(language, String);
    with_field!(exclude_languages, Vec<String>);
    with_field!(deduplicate, bool);
    with_field!(streaming_dedup, bool);
    with_field!(max_file_size, ByteSize);
    with_field!(max_total_size, ByteSize);
    with_field!(exclude_sections, Vec<String>);
    with_field!(output_dir, PathBuf);
    with_field!(format, OutputFormat);
    with_field!(naming_strategy, NamingStrategy);
    with_field!(create_index, bool);
    with_field!(rich_metadata, bool);
    with_field!(add_frontmatter, bool);
    with_field!(proxy, String);
    with_field!(user_agent, String);
    with_field!(max_retries, u32);
    with_field!(connect_timeout, Duration);
    with_field!(read_timeout, Duration);
    with_field!(max_response_size, ByteSize);
    with_field!(auth, Auth);
    with_field!(cache_enabled, bool);
    with_field!(cache_dir, PathBuf);
    with_field!(cache_ttl_days, u32);
    with_field!(skip_unchanged, bool);
    with_field!(resume, bool);
    with_field!(dry_run, bool);

    /// Apply a named profile. Only fields still unset are filled; fields the
    /// caller already set (before or after this call) are left untouched.
    #[must_use]
    pub fn with_profile(self, profile: Profile) -> Self {
        profile.apply(self)
    }

    pub(super) fn fill_if_unset<T>(field: &mut Option<T>, value: T) {
        if field.is_none() {
            *field = Some(value);
        }
    }

    /// Validate and finalize the configuration.
    ///
    /// Compiles `include_paths`/`exclude_paths` glob patterns (surfacing a
    /// `FetchError::Config` early rather than at first use), expands
    /// `$VAR`/`${VAR}` references in `auth` exactly once, and rejects
    /// structurally invalid combinations (e.g. `max_depth == 0` with no
    /// `max_pages` cap, which would crawl forever).
    pub fn build(self) -> Result<FetchConfig, FetchError> {
        let seed_url = self
            .seed_url
            .ok_or_else(|| FetchError::Config("seed_url is required".into()))?;
        url::Url::parse(&seed_url)
            .map_err(|e| FetchError::Config(format!("invalid seed_url '{seed_url}': {e}")))?;

        let include_paths = self.include_paths.unwrap_or_default();
        let exclude_paths = self.exclude_paths.unwrap_or_default();
        for pattern in include_paths.iter().chain(exclude_paths.iter()) {
            compile_glob_pattern(pattern)?;
        }

        let max_depth = self.max_depth.unwrap_or(3);
        let max_pages = self.max_pages;
        if max_depth == 0 && max_pages.is_none() {
            return Err(FetchError::Config(
                "max_depth == 0 requires max_pages to bound the crawl".into(),
            ));
        }

        let max_concurrent = self.max_concurrent.unwrap_or(10);
        if max_concurrent == 0 {
            return Err(FetchError::Config("max_concurrent must be >= 1".into()));
        }

        let output_dir = self
            .output_dir
            .ok_or_else(|| FetchError::Config("output_dir is required".into()))?;

        let auth = self.auth.unwrap_or(Auth::None).expand_env();

        Ok(FetchConfig {
            seed_url,
            max_pages,
            max_depth,
            max_concurrent,
            rate_limit: self.rate_limit.unwrap_or(crate::rate_limiter::DEFAULT_DELAY),
            per_host_concurrent: self
                .per_host_concurrent
                .unwrap_or(crate::rate_limiter::DEFAULT_CONCURRENT),
            include_paths,
            exclude_paths,
            javascript: self.javascript.unwrap_or(false),
            adaptive_rate_limit: self.adaptive_rate_limit.unwrap_or(true),
            allow_subdomains: self.allow_subdomains.unwrap_or(false),
            allowed_domains: self.allowed_domains,
            allow_private_ips: self.allow_private_ips.unwrap_or(false),
            language: self.language,
            exclude_languages: self.exclude_languages.unwrap_or_default(),
            deduplicate: self.deduplicate.unwrap_or(true),
            streaming_dedup: self.streaming_dedup.unwrap_or(true),
            max_file_size: self.max_file_size,
            max_total_size: self.max_total_size,
            exclude_sections: self.exclude_sections.unwrap_or_default(),
            output_dir,
            format: self.format.unwrap_or(OutputFormat::Markdown),
            naming_strategy: self.naming_strategy.unwrap_or(NamingStrategy::Hierarchical),
            create_index: self.create_index.unwrap_or(true),
            rich_metadata: self.rich_metadata.unwrap_or(false),
            add_frontmatter: self.add_frontmatter.unwrap_or(true),
            proxy: self.proxy,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("docpull-rs/{}", env!("CARGO_PKG_VERSION"))),
            max_retries: self.max_retries.unwrap_or(3),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(10)),
            read_timeout: self.read_timeout.unwrap_or(Duration::from_secs(30)),
            max_response_size: self.max_response_size.unwrap_or(ByteSize(10 * 1024 * 1024)),
            auth,
            cache_enabled: self.cache_enabled.unwrap_or(true),
            cache_dir: self.cache_dir,
            cache_ttl_days: self.cache_ttl_days,
            skip_unchanged: self.skip_unchanged.unwrap_or(true),
            resume: self.resume.unwrap_or(false),
            dry_run: self.dry_run.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> FetchConfigBuilder {
        FetchConfigBuilder::new("https://example.com").output_dir(PathBuf::from("/tmp/out"))
    }

    #[test]
    fn builds_with_defaults() {
        let config = minimal().build().unwrap();
        assert_eq!(config.seed_url(), "https://example.com");
        assert_eq!(config.max_depth(), 3);
        assert!(config.adaptive_rate_limit());
    }

    #[test]
    fn rejects_missing_seed_url() {
        let err = FetchConfigBuilder::default()
            .output_dir(PathBuf::from("/tmp/out"))
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn rejects_unbounded_zero_depth_crawl() {
        let err = minimal().max_depth(0).build();
        assert!(err.is_err());
    }

    #[test]
    fn zero_depth_allowed_with_max_pages() {
        let config = minimal().max_depth(0).max_pages(1).build().unwrap();
        assert_eq!(config.max_depth(), 0);
    }

    #[test]
    fn rejects_invalid_glob_pattern() {
        let err = minimal().include_paths(vec!["[".to_string()]).build();
        assert!(err.is_err());
    }

    #[test]
    fn explicit_value_wins_over_profile_regardless_of_order() {
        let before = minimal()
            .max_concurrent(2)
            .with_profile(Profile::Mirror)
            .build()
            .unwrap();
        let after = minimal()
            .with_profile(Profile::Mirror)
            .max_concurrent(2)
            .build()
            .unwrap();
        assert_eq!(before.max_concurrent(), 2);
        assert_eq!(after.max_concurrent(), 2);
    }
}
