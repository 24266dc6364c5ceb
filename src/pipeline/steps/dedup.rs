//! Content-hash deduplication against pages already saved this run.
//!
//! Grounded on `original_source/src/docpull/pipeline/steps/dedup.py`'s
//! `DedupStep`: hashes the Markdown output when present (falling back to
//! the raw HTML), and registers/looks up the hash via
//! [`crate::cache::StreamingDeduplicator`].

use crate::events::SkipReason;
use crate::pipeline::{PageContext, PipelineDeps};

pub async fn run(deps: &PipelineDeps, ctx: &mut PageContext) {
    if !deps.config.streaming_dedup() {
        return;
    }
    let Some(dedup) = &deps.dedup else { return };
    let Some(content) = ctx.content() else { return };

    let (is_new, existing_hash) = dedup.check_and_register(ctx.url.as_str(), content.as_bytes()).await;
    ctx.content_hash = existing_hash.clone();
    if !is_new {
        if let Some(original_url) = existing_hash {
            ctx.skip(SkipReason::DuplicateContent);
            ctx.content_hash = Some(original_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::StreamingDeduplicator;
    use crate::config::FetchConfigBuilder;
    use crate::imurl::ImUrl;
    use crate::pipeline::EventSink;
    use crate::rate_limiter::PerHostRateLimiter;
    use crate::security::robots::RobotsChecker;
    use crate::security::url_validator::UrlValidator;
    use std::collections::HashSet;
    use std::sync::Arc;

    async fn deps(dir: &std::path::Path) -> PipelineDeps {
        let config = Arc::new(
            FetchConfigBuilder::new("https://example.com")
                .output_dir(dir.to_path_buf())
                .build()
                .unwrap(),
        );
        let validator = Arc::new(UrlValidator::new(HashSet::from(["https".to_string()]), None));
        let robots = Arc::new(RobotsChecker::new("docpull", std::time::Duration::from_secs(5)));
        let limiter = Arc::new(PerHostRateLimiter::default());
        let http = Arc::new(crate::http_client::HttpClient::new(&config, limiter).unwrap());
        PipelineDeps {
            config,
            validator,
            robots,
            http,
            cache: None,
            dedup: Some(Arc::new(StreamingDeduplicator::default())),
            events: EventSink::default(),
            json_sink: None,
            sqlite_sink: None,
        }
    }

    #[tokio::test]
    async fn second_page_with_identical_content_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let deps = deps(dir.path()).await;

        let mut first = PageContext::new(ImUrl::parse("https://example.com/a").unwrap(), 0, "a.md".into());
        first.markdown = Some("same content".to_string());
        run(&deps, &mut first).await;
        assert!(!first.should_skip);

        let mut second = PageContext::new(ImUrl::parse("https://example.com/b").unwrap(), 0, "b.md".into());
        second.markdown = Some("same content".to_string());
        run(&deps, &mut second).await;
        assert_eq!(second.skip_reason, Some(SkipReason::DuplicateContent));
    }
}
