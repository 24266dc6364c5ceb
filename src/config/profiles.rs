//! Named configuration profiles: `rag`, `mirror`, `quick`, and `custom`.
//!
//! Grounded on `original_source/src/docpull/models/profiles.py`. That module
//! applied profile defaults via a `deep_update`-style merge that did not
//! reliably preserve "explicit user values win" when a profile was applied
//! after user overrides; here each profile only fills fields the builder
//! hasn't seen yet (SPEC_FULL.md §9 decision 2), so the winner never depends
//! on call order.

use super::builder::FetchConfigBuilder;
use super::types::{NamingStrategy, OutputFormat};
use std::time::Duration;

/// A named bundle of config defaults, applied via [`FetchConfigBuilder::with_profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Tuned for building a retrieval corpus: deduplicate aggressively, keep
    /// only prose, strip navigation chrome, no JS rendering.
    Rag,
    /// Tuned for a faithful full-site mirror: deep crawl, no dedup, preserve
    /// every page including near-duplicates.
    Mirror,
    /// Tuned for a fast preview: shallow crawl, low page cap, no caching.
    Quick,
    /// No defaults beyond the builder's own; an explicit no-op profile so
    /// callers can select "profile: custom" without a branch.
    Custom,
}

impl Profile {
    pub(super) fn apply(self, builder: FetchConfigBuilder) -> FetchConfigBuilder {
        match self {
            Profile::Rag => apply_rag(builder),
            Profile::Mirror => apply_mirror(builder),
            Profile::Quick => apply_quick(builder),
            Profile::Custom => builder,
        }
    }
}

fn apply_rag(builder: FetchConfigBuilder) -> FetchConfigBuilder {
    fill(builder, |b| {
        b.max_depth = Some(b.max_depth.unwrap_or(5));
        b.deduplicate = Some(b.deduplicate.unwrap_or(true));
        b.streaming_dedup = Some(b.streaming_dedup.unwrap_or(true));
        b.rich_metadata = Some(b.rich_metadata.unwrap_or(true));
        b.add_frontmatter = Some(b.add_frontmatter.unwrap_or(true));
        b.naming_strategy = Some(b.naming_strategy.unwrap_or(NamingStrategy::Hierarchical));
        b.format = Some(b.format.unwrap_or(OutputFormat::Markdown));
        b.exclude_sections = Some(
            b.exclude_sections
                .clone()
                .unwrap_or_else(|| vec!["nav".into(), "footer".into(), "sidebar".into()]),
        );
    })
}

fn apply_mirror(builder: FetchConfigBuilder) -> FetchConfigBuilder {
    fill(builder, |b| {
        b.max_depth = Some(b.max_depth.unwrap_or(20));
        b.deduplicate = Some(b.deduplicate.unwrap_or(false));
        b.streaming_dedup = Some(b.streaming_dedup.unwrap_or(false));
        b.naming_strategy = Some(b.naming_strategy.unwrap_or(NamingStrategy::Full));
        b.resume = Some(b.resume.unwrap_or(true));
        b.cache_enabled = Some(b.cache_enabled.unwrap_or(true));
    })
}

fn apply_quick(builder: FetchConfigBuilder) -> FetchConfigBuilder {
    fill(builder, |b| {
        b.max_depth = Some(b.max_depth.unwrap_or(1));
        b.max_pages = Some(b.max_pages.unwrap_or(20));
        b.cache_enabled = Some(b.cache_enabled.unwrap_or(false));
        b.rate_limit = Some(b.rate_limit.unwrap_or(Duration::from_millis(200)));
    })
}

/// Apply `f` to the builder's private fields without exposing them outside
/// this module. `f` is expected to only ever write through `Option::or`-style
/// "fill if unset" logic.
fn fill(mut builder: FetchConfigBuilder, f: impl FnOnce(&mut FetchConfigBuilder)) -> FetchConfigBuilder {
    f(&mut builder);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn quick_profile_caps_pages_and_depth() {
        let config = FetchConfigBuilder::new("https://example.com")
            .output_dir(PathBuf::from("/tmp/out"))
            .with_profile(Profile::Quick)
            .build()
            .unwrap();
        assert_eq!(config.max_depth(), 1);
        assert_eq!(config.max_pages(), Some(20));
        assert!(!config.cache_enabled());
    }

    #[test]
    fn mirror_profile_disables_dedup() {
        let config = FetchConfigBuilder::new("https://example.com")
            .output_dir(PathBuf::from("/tmp/out"))
            .with_profile(Profile::Mirror)
            .build()
            .unwrap();
        assert!(!config.deduplicate());
        assert_eq!(config.max_depth(), 20);
    }

    #[test]
    fn custom_profile_leaves_defaults_untouched() {
        let config = FetchConfigBuilder::new("https://example.com")
            .output_dir(PathBuf::from("/tmp/out"))
            .with_profile(Profile::Custom)
            .build()
            .unwrap();
        assert_eq!(config.max_depth(), 3);
    }
}
