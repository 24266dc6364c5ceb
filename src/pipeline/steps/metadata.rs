//! Parses the fetched HTML and extracts title/description (+ rich fields
//! when `rich_metadata` is enabled).
//!
//! Grounded on `original_source/src/docpull/pipeline/steps/metadata.py`'s
//! `MetadataStep`, wrapping the functions in [`crate::metadata`].

use crate::pipeline::{PageContext, PipelineDeps};
use scraper::Html;

pub fn run(deps: &PipelineDeps, ctx: &mut PageContext) {
    let Some(html) = ctx.html.as_deref() else { return };
    let document = Html::parse_document(html);

    ctx.title = crate::metadata::extract_title(&document);
    ctx.metadata = if deps.config.rich_metadata() {
        crate::metadata::extract_rich(&document)
    } else {
        crate::metadata::PageMetadata {
            description: crate::metadata::extract_description(&document),
            ..Default::default()
        }
    };
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

    fn deps(rich: bool) -> PipelineDeps {
        let dir = tempfile::tempdir().unwrap();
        let config = Arc::new(
            FetchConfigBuilder::new("https://example.com")
                .output_dir(dir.path().to_path_buf())
                .rich_metadata(rich)
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
            dedup: None,
            events: EventSink::default(),
            json_sink: None,
            sqlite_sink: None,
        }
    }

    #[test]
    fn extracts_title_and_description() {
        let deps = deps(false);
        let mut ctx = PageContext::new(ImUrl::parse("https://example.com/").unwrap(), 0, "o.md".into());
        ctx.html = Some(
            r#"<html><head><title>T</title><meta name="description" content="D"></head></html>"#
                .to_string(),
        );
        run(&deps, &mut ctx);
        assert_eq!(ctx.title.as_deref(), Some("T"));
        assert_eq!(ctx.metadata.description.as_deref(), Some("D"));
    }

    #[test]
    fn rich_mode_extracts_open_graph_fields() {
        let deps = deps(true);
        let mut ctx = PageContext::new(ImUrl::parse("https://example.com/").unwrap(), 0, "o.md".into());
        ctx.html = Some(
            r#"<html><head><meta property="og:site_name" content="Docs"></head></html>"#.to_string(),
        );
        run(&deps, &mut ctx);
        assert_eq!(ctx.metadata.site_name.as_deref(), Some("Docs"));
    }
}
