//! JSON-array sink: every page becomes one record in a single output file.
//!
//! Grounded on `original_source/src/docpull/pipeline/steps/save_json.py`'s
//! `JsonSaveStep`: records stream to a temp file one at a time (never
//! holding the whole document set in memory) with a trailing atomic
//! rename onto the real output path, and a zero-record run still produces
//! a minimal, valid `[]` document rather than an empty file.

use crate::error::FetchResult;
use crate::pipeline::{PageContext, PipelineDeps};
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

pub struct JsonSink {
    file: tokio::fs::File,
    tmp_path: PathBuf,
    final_path: PathBuf,
    wrote_any: bool,
}

impl JsonSink {
    pub async fn create(final_path: PathBuf) -> FetchResult<Self> {
        if let Some(dir) = final_path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let tmp_path = final_path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(b"[\n").await?;
        Ok(Self {
            file,
            tmp_path,
            final_path,
            wrote_any: false,
        })
    }

    pub async fn append(&mut self, record: &JsonRecord<'_>) -> FetchResult<()> {
        if self.wrote_any {
            self.file.write_all(b",\n").await?;
        }
        let bytes = serde_json::to_vec(record)?;
        self.file.write_all(&bytes).await?;
        self.wrote_any = true;
        Ok(())
    }

    /// Close the array, flush, and atomically publish at `final_path`.
    pub async fn finalize(mut self) -> FetchResult<()> {
        self.file.write_all(b"\n]\n").await?;
        self.file.flush().await?;
        drop(self.file);
        tokio::fs::rename(&self.tmp_path, &self.final_path).await?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRecord<'a> {
    pub url: &'a str,
    pub title: Option<&'a str>,
    pub content: &'a str,
    pub metadata: std::collections::BTreeMap<String, String>,
    pub status_code: Option<u16>,
    pub content_type: Option<&'a str>,
}

pub async fn run(deps: &PipelineDeps, ctx: &mut PageContext) {
    let Some(content) = ctx.content() else { return };
    if deps.config.dry_run() {
        return;
    }
    let Some(sink) = &deps.json_sink else { return };

    let record = JsonRecord {
        url: ctx.url.as_str(),
        title: ctx.title.as_deref(),
        content,
        metadata: ctx.metadata.to_map(),
        status_code: ctx.status_code,
        content_type: ctx.content_type.as_deref(),
    };

    let mut sink = sink.lock().await;
    if let Err(err) = sink.append(&record).await {
        drop(sink);
        ctx.fail(err.to_string());
        return;
    }
    drop(sink);

    if let Some(cache) = &deps.cache {
        cache.lock().await.mark_fetched(ctx.url.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_records_still_produces_valid_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pages.json");
        let sink = JsonSink::create(out.clone()).await.unwrap();
        sink.finalize().await.unwrap();
        let body = tokio::fs::read_to_string(&out).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, serde_json::json!([]));
    }

    #[tokio::test]
    async fn records_append_into_a_single_valid_array() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pages.json");
        let mut sink = JsonSink::create(out.clone()).await.unwrap();
        for i in 0..3 {
            let url = format!("https://example.com/{i}");
            let content = format!("content {i}");
            let record = JsonRecord {
                url: &url,
                title: None,
                content: &content,
                metadata: std::collections::BTreeMap::new(),
                status_code: Some(200),
                content_type: Some("text/html"),
            };
            sink.append(&record).await.unwrap();
        }
        sink.finalize().await.unwrap();
        let body = tokio::fs::read_to_string(&out).await.unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.len(), 3);
    }
}
