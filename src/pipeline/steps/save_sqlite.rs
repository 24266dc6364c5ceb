//! SQLite sink: every page becomes one row in a `documents` table.
//!
//! Grounded on `original_source/src/docpull/pipeline/steps/save_sqlite.py`'s
//! `SqliteSaveStep` (`INSERT OR IGNORE` against a unique URL column, counting
//! actually-inserted rows rather than assuming success), with a connection
//! setup (WAL journal mode, a bounded connection pool, idempotent
//! `CREATE TABLE IF NOT EXISTS`) carried over from this codebase's other
//! `sqlx`-backed store.

use crate::error::FetchResult;
use crate::pipeline::{PageContext, PipelineDeps};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    url TEXT PRIMARY KEY,
    title TEXT,
    content TEXT NOT NULL,
    metadata_json TEXT NOT NULL,
    status_code INTEGER,
    content_type TEXT,
    fetched_at INTEGER NOT NULL
);
"#;

pub struct SqliteSink {
    pool: SqlitePool,
}

impl SqliteSink {
    pub async fn open(db_path: &Path) -> FetchResult<Self> {
        if let Some(dir) = db_path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        sqlx::query(SCHEMA_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Insert a document, returning `true` if a new row was written (`false`
    /// if a row for this URL already existed and was left untouched).
    pub async fn insert(&self, record: &DocumentRecord<'_>) -> FetchResult<bool> {
        let metadata_json = serde_json::to_string(&record.metadata)?;
        let fetched_at = record.fetched_at;
        let result = sqlx::query(
            "INSERT OR IGNORE INTO documents \
             (url, title, content, metadata_json, status_code, content_type, fetched_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.url)
        .bind(record.title)
        .bind(record.content)
        .bind(&metadata_json)
        .bind(record.status_code.map(i64::from))
        .bind(record.content_type)
        .bind(fetched_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct DocumentRecord<'a> {
    pub url: &'a str,
    pub title: Option<&'a str>,
    pub content: &'a str,
    pub metadata: std::collections::BTreeMap<String, String>,
    pub status_code: Option<u16>,
    pub content_type: Option<&'a str>,
    pub fetched_at: i64,
}

fn unix_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

pub async fn run(deps: &PipelineDeps, ctx: &mut PageContext) {
    let Some(content) = ctx.content() else { return };
    if deps.config.dry_run() {
        return;
    }
    let Some(sink) = &deps.sqlite_sink else { return };

    let record = DocumentRecord {
        url: ctx.url.as_str(),
        title: ctx.title.as_deref(),
        content,
        metadata: ctx.metadata.to_map(),
        status_code: ctx.status_code,
        content_type: ctx.content_type.as_deref(),
        fetched_at: unix_timestamp(),
    };

    match sink.insert(&record).await {
        Ok(_inserted) => {
            if let Some(cache) = &deps.cache {
                cache.lock().await.mark_fetched(ctx.url.as_str());
            }
        }
        Err(err) => ctx.fail(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_insert_of_same_url_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::open(&dir.path().join("pages.sqlite")).await.unwrap();

        let record = DocumentRecord {
            url: "https://example.com/a",
            title: Some("A"),
            content: "hello",
            metadata: std::collections::BTreeMap::new(),
            status_code: Some(200),
            content_type: Some("text/html"),
            fetched_at: 0,
        };
        assert!(sink.insert(&record).await.unwrap());
        assert!(!sink.insert(&record).await.unwrap());
    }
}
