//! Issues the HTTP request and gates on content type.
//!
//! Grounded on `original_source/src/docpull/pipeline/steps/fetch.py`'s
//! `FetchStep`: the `ALLOWED_CONTENT_TYPES` allowlist, treating 4xx as a
//! skip rather than a hard failure (a broken link shouldn't abort a crawl),
//! and recording `etag`/`last_modified` for the cache step that follows.

use crate::events::SkipReason;
use crate::pipeline::{PageContext, PipelineDeps};

const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "text/html",
    "application/xhtml+xml",
    "text/xml",
    "application/xml",
    "application/atom+xml",
    "application/rss+xml",
];

pub async fn run(deps: &PipelineDeps, ctx: &mut PageContext) {
    let page = match deps.http.get(&ctx.url).await {
        Ok(page) => page,
        Err(err) => {
            if let Some(cache) = &deps.cache {
                cache.lock().await.mark_failed(ctx.url.as_str());
            }
            ctx.fail(err.to_string());
            return;
        }
    };

    ctx.status_code = Some(page.status.as_u16());
    ctx.bytes_downloaded = page.raw_len as u64;
    ctx.etag = page.etag.clone();
    ctx.last_modified = page.last_modified.clone();

    if page.status.is_client_error() {
        ctx.skip(SkipReason::HttpError);
        return;
    }

    let content_type = page.content_type.clone();
    let base_type = content_type
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .map(str::to_ascii_lowercase);
    if !base_type.as_deref().is_some_and(|t| ALLOWED_CONTENT_TYPES.contains(&t)) {
        ctx.skip(SkipReason::InvalidContentType);
        return;
    }
    ctx.content_type = content_type;

    if deps.config.skip_unchanged() {
        if let Some(cache) = &deps.cache {
            let cache = cache.lock().await;
            if !cache.has_changed(
                ctx.url.as_str(),
                page.body.as_bytes(),
                ctx.etag.as_deref(),
                ctx.last_modified.as_deref(),
            ) {
                drop(cache);
                ctx.skip(SkipReason::CacheUnchanged);
                return;
            }
        }
    }

    ctx.html = Some(page.body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfigBuilder;
    use crate::imurl::ImUrl;
    use crate::pipeline::EventSink;
    use crate::rate_limiter::PerHostRateLimiter;
    use crate::security::robots::RobotsChecker;
    use crate::security::url_validator::UrlValidator;
    use std::collections::HashSet;
    use std::sync::Arc;

    async fn deps_for(server: &mockito::ServerGuard, dir: &std::path::Path) -> PipelineDeps {
        let config = Arc::new(
            FetchConfigBuilder::new(server.url())
                .output_dir(dir.to_path_buf())
                .build()
                .unwrap(),
        );
        let validator = Arc::new(UrlValidator::new(HashSet::from(["http".to_string()]), None));
        let robots = Arc::new(RobotsChecker::new("docpull", std::time::Duration::from_secs(5)));
        let limiter = Arc::new(PerHostRateLimiter::default());
        let http = Arc::new(crate::http_client::HttpClient::new(&config, limiter).unwrap());
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
    async fn rejects_non_html_content_type() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body("binary")
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let deps = deps_for(&server, dir.path()).await;
        let mut ctx = PageContext::new(ImUrl::parse(&server.url()).unwrap(), 0, dir.path().join("o.md"));
        run(&deps, &mut ctx).await;
        assert_eq!(ctx.skip_reason, Some(SkipReason::InvalidContentType));
    }

    #[tokio::test]
    async fn client_error_is_a_skip_not_a_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/").with_status(404).create_async().await;
        let dir = tempfile::tempdir().unwrap();
        let deps = deps_for(&server, dir.path()).await;
        let mut ctx = PageContext::new(ImUrl::parse(&server.url()).unwrap(), 0, dir.path().join("o.md"));
        run(&deps, &mut ctx).await;
        assert_eq!(ctx.skip_reason, Some(SkipReason::HttpError));
        assert!(ctx.error.is_none());
    }

    #[tokio::test]
    async fn accepts_html_and_captures_etag() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_header("etag", "\"abc\"")
            .with_body("<html></html>")
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let deps = deps_for(&server, dir.path()).await;
        let mut ctx = PageContext::new(ImUrl::parse(&server.url()).unwrap(), 0, dir.path().join("o.md"));
        run(&deps, &mut ctx).await;
        assert!(!ctx.should_skip);
        assert_eq!(ctx.etag.as_deref(), Some("\"abc\""));
        assert!(ctx.html.is_some());
    }
}
