//! Retrying, rate-limited, size-capped HTTP client.
//!
//! Grounded on `original_source/src/docpull/http/client.py`'s `AsyncHttpClient`
//! (retry/backoff shape, streamed size-limit enforcement, encoding fallback
//! chain) rebuilt over `reqwest` in the teacher's client-construction idiom
//! (see `inline_css/css_downloader.rs`, `inline_css/downloaders.rs`).

use crate::config::{Auth, ByteSize, FetchConfig};
use crate::error::{FetchError, FetchResult};
use crate::imurl::ImUrl;
use crate::rate_limiter::PerHostRateLimiter;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

const RETRYABLE_STATUS: &[StatusCode] = &[
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// A fetched page: decoded text plus the metadata needed downstream.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
    pub raw_len: usize,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

pub struct HttpClient {
    client: Client,
    rate_limiter: Arc<PerHostRateLimiter>,
    max_retries: u32,
    max_response_size: ByteSize,
    default_timeout: Duration,
    auth: Auth,
}

impl HttpClient {
    /// Build a client from a validated [`FetchConfig`], sharing `rate_limiter`
    /// with the rest of the pipeline so per-host pacing state is singular.
    pub fn new(config: &FetchConfig, rate_limiter: Arc<PerHostRateLimiter>) -> FetchResult<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent())
            .connect_timeout(config.connect_timeout())
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(proxy) = config.proxy() {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy)
                    .map_err(|e| FetchError::Config(format!("invalid proxy '{proxy}': {e}")))?,
            );
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Construction(e.to_string()))?;

        Ok(Self {
            client,
            rate_limiter,
            max_retries: config.max_retries(),
            max_response_size: config.max_response_size(),
            default_timeout: config.read_timeout(),
            auth: config.auth().clone(),
        })
    }

    /// Fetch `url`, retrying transient failures with exponential backoff and
    /// jitter. Applies the per-host rate limiter around every attempt,
    /// including retries, so a retried request still pays its host's pacing
    /// cost.
    pub async fn get(&self, url: &ImUrl) -> FetchResult<FetchedPage> {
        let host = url
            .host_key()
            .ok_or_else(|| FetchError::UrlRejected {
                url: url.to_string(),
                reason: "URL has no host".to_string(),
            })?;

        let mut headers = HeaderMap::new();
        self.auth
            .merge_into(&mut headers)
            .map_err(FetchError::Other)?;

        for attempt in 0..=self.max_retries {
            let _slot = self.rate_limiter.limit(&host).await;

            let response = self
                .client
                .get(url.as_str())
                .headers(headers.clone())
                .timeout(self.default_timeout)
                .send()
                .await;

            let response = match response {
                Ok(response) => response,
                Err(err) => {
                    if attempt < self.max_retries {
                        tokio::time::sleep(retry_delay(attempt)).await;
                        continue;
                    }
                    return Err(FetchError::FetchExhausted {
                        url: url.to_string(),
                        attempts: attempt + 1,
                        source: err,
                    });
                }
            };

            let status = response.status();
            if RETRYABLE_STATUS.contains(&status) {
                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = parse_retry_after(response.headers().get("retry-after"));
                    self.rate_limiter.record_rate_limit(&host, retry_after);
                }
                if attempt < self.max_retries {
                    tokio::time::sleep(retry_delay(attempt)).await;
                    continue;
                }
                return Err(FetchError::FetchExhausted {
                    url: url.to_string(),
                    attempts: attempt + 1,
                    source: response.error_for_status().unwrap_err(),
                });
            }

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let etag = response
                .headers()
                .get("etag")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let last_modified = response
                .headers()
                .get("last-modified")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            if let Some(len) = response.content_length() {
                if len as usize > self.max_response_size.bytes() {
                    return Err(FetchError::ContentTooLarge {
                        url: url.to_string(),
                        limit: self.max_response_size.bytes(),
                    });
                }
            }

            let bytes = stream_capped(response, self.max_response_size.bytes(), url.as_str()).await?;
            self.rate_limiter.record_success(&host);

            let body = decode_body(&bytes, content_type.as_deref());
            return Ok(FetchedPage {
                url: url.to_string(),
                status,
                content_type,
                raw_len: bytes.len(),
                body,
                etag,
                last_modified,
            });
        }

        unreachable!("loop always returns: either a page, a retryable-status error, or a send() error")
    }
}

async fn stream_capped(response: reqwest::Response, limit: usize, url: &str) -> FetchResult<Vec<u8>> {
    use futures_util::StreamExt;

    let mut buf = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        buf.extend_from_slice(&chunk);
        if buf.len() > limit {
            return Err(FetchError::ContentTooLarge {
                url: url.to_string(),
                limit,
            });
        }
    }
    Ok(buf)
}

/// Decode bytes to text: declared charset, then `encoding_rs` sniffing,
/// then UTF-8 with replacement. Mirrors the original's charset-normalizer
/// fallback chain (SPEC_FULL.md §14).
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type.and_then(extract_charset);
    if let Some(label) = declared {
        if let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes()) {
            let (decoded, _, had_errors) = encoding.decode(bytes);
            if !had_errors {
                return decoded.into_owned();
            }
        }
    }
    let (decoded, _, _) = encoding_rs::UTF_8.decode(bytes);
    decoded.into_owned()
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("charset="))
        .map(|s| s.trim_matches(|c| c == '"' || c == '\'').to_string())
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    header
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Exponential backoff with jitter: `base * 2^attempt + rand(0, 1s)`.
fn retry_delay(attempt: u32) -> Duration {
    let base = Duration::from_secs(1).mul_f64(2f64.powi(attempt as i32));
    let jitter = Duration::from_millis(rand::random::<u64>() % 1000);
    base + jitter
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_config(url: &str) -> FetchConfig {
        crate::config::FetchConfigBuilder::new(url)
            .output_dir(PathBuf::from("/tmp/out"))
            .max_retries(2)
            .build()
            .unwrap()
    }

    #[test]
    fn extracts_charset_from_content_type() {
        assert_eq!(
            extract_charset("text/html; charset=iso-8859-1"),
            Some("iso-8859-1".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }

    #[test]
    fn decodes_utf8_when_no_charset_declared() {
        let body = decode_body("héllo".as_bytes(), None);
        assert_eq!(body, "héllo");
    }

    #[tokio::test]
    async fn get_retries_on_503_then_succeeds() {
        let mut server = mockito::Server::new_async().await;
        let fail = server
            .mock("GET", "/")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;
        let ok = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("hello")
            .expect(1)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let limiter = Arc::new(PerHostRateLimiter::default());
        let client = HttpClient::new(&config, limiter).unwrap();
        let url = ImUrl::parse(&server.url()).unwrap();

        let page = client.get(&url).await.unwrap();
        assert_eq!(page.body, "hello");
        fail.assert_async().await;
        ok.assert_async().await;
    }

    #[tokio::test]
    async fn get_fails_after_exhausting_retries() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(500)
            .expect(3)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let limiter = Arc::new(PerHostRateLimiter::default());
        let client = HttpClient::new(&config, limiter).unwrap();
        let url = ImUrl::parse(&server.url()).unwrap();

        let err = client.get(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::FetchExhausted { .. }));
    }
}
