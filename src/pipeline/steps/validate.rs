//! URL validation: SSRF/scheme gate, robots.txt, then an existing-file check.
//!
//! Grounded on `original_source/src/docpull/pipeline/steps/validate.py`'s
//! `ValidateStep`: runs the URL validator, then the robots checker, then
//! (when the run isn't set to overwrite) skips URLs whose output file
//! already exists on disk.

use crate::events::SkipReason;
use crate::pipeline::{PageContext, PipelineDeps};

pub async fn run(deps: &PipelineDeps, ctx: &mut PageContext) {
    if let Err(reason) = deps.validator.validate(ctx.url.as_str()) {
        ctx.fail(reason.to_string());
        return;
    }

    if !deps.robots.is_allowed(&ctx.url).await {
        ctx.skip(SkipReason::RobotsDisallowed);
        return;
    }

    if let Some(cache) = &deps.cache {
        let cache = cache.lock().await;
        if cache.is_fetched(ctx.url.as_str()) && deps.config.skip_unchanged() {
            ctx.skip(SkipReason::AlreadyFetched);
            return;
        }
        if cache.is_failed(ctx.url.as_str()) && !deps.config.resume() {
            ctx.skip(SkipReason::AlreadyFetched);
            return;
        }
    }

    if !deps.config.dry_run() && tokio::fs::try_exists(&ctx.output_path).await.unwrap_or(false) {
        ctx.skip(SkipReason::FileExists);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheManager;
    use crate::config::FetchConfigBuilder;
    use crate::http_client::HttpClient;
    use crate::imurl::ImUrl;
    use crate::pipeline::EventSink;
    use crate::rate_limiter::PerHostRateLimiter;
    use crate::security::robots::RobotsChecker;
    use crate::security::url_validator::UrlValidator;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    async fn deps(output_dir: PathBuf) -> PipelineDeps {
        let config = Arc::new(
            FetchConfigBuilder::new("https://example.com")
                .output_dir(output_dir)
                .build()
                .unwrap(),
        );
        let validator = Arc::new(UrlValidator::new(HashSet::from(["https".to_string()]), None));
        let robots = Arc::new(RobotsChecker::new("docpull", std::time::Duration::from_secs(5)));
        let limiter = Arc::new(PerHostRateLimiter::default());
        let http = Arc::new(HttpClient::new(&config, limiter).unwrap());
        PipelineDeps {
            config,
            validator,
            robots,
            http,
            cache: None,
            dedup: None,
            events: EventSink::default(),
            json_sink: None,
            sqlite_sink: None,
        }
    }

    #[tokio::test]
    async fn rejects_disallowed_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let deps = deps(dir.path().to_path_buf()).await;
        let mut ctx = PageContext::new(
            ImUrl::parse("ftp://example.com/file").unwrap(),
            0,
            dir.path().join("out.md"),
        );
        run(&deps, &mut ctx).await;
        assert!(ctx.should_skip);
        assert!(ctx.error.is_some());
    }

    #[tokio::test]
    async fn skips_when_output_file_already_exists() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        tokio::fs::write(&out, "existing").await.unwrap();
        let deps = deps(dir.path().to_path_buf()).await;
        let mut ctx = PageContext::new(ImUrl::parse("https://example.com/page").unwrap(), 0, out);
        run(&deps, &mut ctx).await;
        assert_eq!(ctx.skip_reason, Some(SkipReason::FileExists));
    }

    #[tokio::test]
    async fn skips_already_fetched_urls_when_cache_present() {
        let dir = tempfile::tempdir().unwrap();
        let mut deps = deps(dir.path().to_path_buf()).await;
        let mut cache = CacheManager::open(dir.path().join("cache"), None).await.unwrap();
        cache.mark_fetched("https://example.com/page");
        deps.cache = Some(Arc::new(Mutex::new(cache)));
        let mut ctx = PageContext::new(
            ImUrl::parse("https://example.com/page").unwrap(),
            0,
            dir.path().join("out.md"),
        );
        run(&deps, &mut ctx).await;
        assert_eq!(ctx.skip_reason, Some(SkipReason::AlreadyFetched));
    }
}
