//! Filesystem sink: writes `ctx.output_path`, guarding against path
//! traversal outside the configured output directory.
//!
//! Grounded on `original_source/src/docpull/pipeline/steps/save.py`'s
//! `SaveStep`: resolves the output path and checks it's still inside the
//! output directory before creating parent directories and writing.

use crate::error::FetchError;
use crate::pipeline::{PageContext, PipelineDeps};

pub async fn run(deps: &PipelineDeps, ctx: &mut PageContext) {
    let Some(content) = ctx.content().map(str::to_string) else { return };

    if deps.config.dry_run() {
        return;
    }

    if let Err(err) = check_within_base(&ctx.output_path, deps.config.output_dir()) {
        ctx.fail(err.to_string());
        return;
    }

    if let Some(parent) = ctx.output_path.parent() {
        if let Err(err) = tokio::fs::create_dir_all(parent).await {
            ctx.fail(err.to_string());
            return;
        }
    }

    if let Err(err) = tokio::fs::write(&ctx.output_path, content).await {
        ctx.fail(err.to_string());
        return;
    }

    if let Some(cache) = &deps.cache {
        let mut cache = cache.lock().await;
        cache.update_cache(
            ctx.url.as_str(),
            ctx.content().unwrap_or_default().as_bytes(),
            ctx.output_path.to_string_lossy().as_ref(),
            ctx.etag.as_deref(),
            ctx.last_modified.as_deref(),
        );
        cache.mark_fetched(ctx.url.as_str());
    }
}

/// Reject an output path that (after resolving `..` segments against the
/// base directory) would fall outside it. The base directory may not yet
/// exist, so this resolves against its lexical form rather than
/// canonicalizing the filesystem.
fn check_within_base(path: &std::path::Path, base: &std::path::Path) -> Result<(), FetchError> {
    use std::path::Component;

    fn lexical_normalize(path: &std::path::Path) -> std::path::PathBuf {
        let mut out = std::path::PathBuf::new();
        for component in path.components() {
            match component {
                Component::ParentDir => {
                    out.pop();
                }
                Component::CurDir => {}
                other => out.push(other.as_os_str()),
            }
        }
        out
    }

    let normalized = lexical_normalize(path);
    let normalized_base = lexical_normalize(base);
    if normalized.starts_with(&normalized_base) {
        Ok(())
    } else {
        Err(FetchError::PathTraversal {
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_escaping_base_dir() {
        let base = std::path::Path::new("/out");
        let escaping = std::path::Path::new("/out/../secret.md");
        assert!(check_within_base(escaping, base).is_err());
    }

    #[test]
    fn accepts_path_inside_base_dir() {
        let base = std::path::Path::new("/out");
        let inside = std::path::Path::new("/out/docs/page.md");
        assert!(check_within_base(inside, base).is_ok());
    }
}
