//! Polite, concurrent web documentation crawler: sitemap and link discovery,
//! adaptive per-host rate limiting, and Markdown/JSON/SQLite persistence.
//!
//! The crate's entry point is [`Fetcher`]: construct it from a [`FetchConfig`],
//! subscribe to its event stream, and call [`Fetcher::run`].

pub mod cache;
pub mod config;
pub mod content_saver;
pub mod discovery;
pub mod error;
pub mod events;
pub mod fetcher;
pub mod http_client;
pub mod imurl;
pub mod metadata;
pub mod naming;
pub mod pipeline;
pub mod rate_limiter;
pub mod security;

pub use config::{Auth, ByteSize, FetchConfig, FetchConfigBuilder, NamingStrategy, OutputFormat, Profile};
pub use error::{FetchError, FetchResult};
pub use events::{EventType, FetchEvent, FetchStats, SkipReason};
pub use fetcher::Fetcher;
pub use imurl::ImUrl;
