//! Crate-wide error types.
//!
//! Mirrors the error taxonomy of the fetch engine: input rejection, transient
//! fetch failures, content oversize, and catastrophic orchestrator failures
//! are all distinct variants so callers can match on them; everything else
//! collapses into `Other` via `anyhow`.

use thiserror::Error;

/// Result type alias used across the crate's public boundary.
pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Configuration failed validation at build time.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A URL did not pass the validator or robots gate and the caller
    /// requested a hard error instead of a skip (e.g. the seed URL itself).
    #[error("URL rejected: {url} ({reason})")]
    UrlRejected { url: String, reason: String },

    /// Response body exceeded the configured maximum size.
    #[error("response body for {url} exceeded {limit} bytes")]
    ContentTooLarge { url: String, limit: usize },

    /// A fetch exhausted its retry budget.
    #[error("fetch of {url} failed after {attempts} attempts: {source}")]
    FetchExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// Output path resolved outside the configured base directory.
    #[error("refusing to write outside base directory: {path}")]
    PathTraversal { path: String },

    /// The orchestrator could not construct one of its components.
    #[error("fetcher construction failed: {0}")]
    Construction(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl FetchError {
    /// Whether this error reflects a condition the pipeline driver should
    /// record as a per-URL failure (as opposed to one it should propagate
    /// to the caller as a construction/config error).
    #[must_use]
    pub fn is_per_url(&self) -> bool {
        matches!(
            self,
            FetchError::UrlRejected { .. }
                | FetchError::ContentTooLarge { .. }
                | FetchError::FetchExhausted { .. }
                | FetchError::PathTraversal { .. }
                | FetchError::Http(_)
                | FetchError::Io(_)
                | FetchError::Json(_)
                | FetchError::Sqlite(_)
                | FetchError::Xml(_)
                | FetchError::Other(_)
        )
    }
}
