//! End-to-end scenarios against a mock HTTP server, mirroring the concrete
//! cases described for the fetch engine: sitemap discovery, a robots-blocked
//! page, and duplicate-content deduplication across three URLs.

use docpull_rs::{FetchConfigBuilder, Fetcher, OutputFormat};
use tempfile::TempDir;

fn config(seed_url: &str, output_dir: &std::path::Path) -> docpull_rs::FetchConfig {
    FetchConfigBuilder::new(seed_url)
        .output_dir(output_dir.to_path_buf())
        .allow_private_ips(true)
        .max_retries(1)
        .format(OutputFormat::Json)
        .build()
        .unwrap()
}

#[tokio::test]
async fn sitemap_happy_path_fetches_both_pages() {
    let mut server = mockito::Server::new_async().await;

    let _robots = server.mock("GET", "/robots.txt").with_status(404).create_async().await;
    let _sitemap = server
        .mock("GET", "/sitemap.xml")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(format!(
            r#"<?xml version="1.0"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/a</loc></url>
  <url><loc>{base}/b</loc></url>
</urlset>"#,
            base = server.url()
        ))
        .create_async()
        .await;
    let _page_a = server
        .mock("GET", "/a")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><head><title>A</title></head><body><main><p>Page A content</p></main></body></html>")
        .create_async()
        .await;
    let _page_b = server
        .mock("GET", "/b")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><head><title>B</title></head><body><main><p>Page B content</p></main></body></html>")
        .create_async()
        .await;

    let out = TempDir::new().unwrap();
    let cfg = config(&server.url(), out.path());
    let fetcher = Fetcher::new(cfg).await.unwrap();
    let stats = fetcher.run().await.unwrap();
    fetcher.finalize().await.unwrap();

    assert_eq!(stats.urls_discovered, 2);
    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.pages_failed, 0);

    let body = tokio::fs::read_to_string(out.path().join("pages.json")).await.unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn robots_disallowed_page_is_skipped_not_failed() {
    let mut server = mockito::Server::new_async().await;

    let _robots = server
        .mock("GET", "/robots.txt")
        .with_status(200)
        .with_body("User-agent: *\nDisallow: /b\n")
        .create_async()
        .await;
    let _sitemap = server
        .mock("GET", "/sitemap.xml")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(format!(
            r#"<?xml version="1.0"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/a</loc></url>
  <url><loc>{base}/b</loc></url>
</urlset>"#,
            base = server.url()
        ))
        .create_async()
        .await;
    let _page_a = server
        .mock("GET", "/a")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><head><title>A</title></head><body><main><p>Page A content</p></main></body></html>")
        .create_async()
        .await;

    let out = TempDir::new().unwrap();
    let cfg = config(&server.url(), out.path());
    let fetcher = Fetcher::new(cfg).await.unwrap();
    let stats = fetcher.run().await.unwrap();
    fetcher.finalize().await.unwrap();

    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.pages_skipped, 1);
    assert_eq!(stats.pages_failed, 0);
}

#[tokio::test]
async fn duplicate_content_across_urls_is_deduplicated() {
    let mut server = mockito::Server::new_async().await;

    let _robots = server.mock("GET", "/robots.txt").with_status(404).create_async().await;
    let _sitemap = server
        .mock("GET", "/sitemap.xml")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(format!(
            r#"<?xml version="1.0"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/a</loc></url>
  <url><loc>{base}/b</loc></url>
  <url><loc>{base}/c</loc></url>
</urlset>"#,
            base = server.url()
        ))
        .create_async()
        .await;
    let same_body = "<html><head><title>Same</title></head><body><main><p>Identical content</p></main></body></html>";
    for path in ["/a", "/b", "/c"] {
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(same_body)
            .create_async()
            .await;
    }

    let out = TempDir::new().unwrap();
    let cfg = config(&server.url(), out.path());
    let fetcher = Fetcher::new(cfg).await.unwrap();
    let stats = fetcher.run().await.unwrap();
    fetcher.finalize().await.unwrap();

    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.pages_deduplicated, 2);
}

#[tokio::test]
async fn zero_max_pages_yields_a_clean_empty_run() {
    let mut server = mockito::Server::new_async().await;
    let _robots = server.mock("GET", "/robots.txt").with_status(404).create_async().await;
    let _sitemap = server
        .mock("GET", "/sitemap.xml")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(format!(
            r#"<?xml version="1.0"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/a</loc></url>
</urlset>"#,
            base = server.url()
        ))
        .create_async()
        .await;

    let out = TempDir::new().unwrap();
    let cfg = FetchConfigBuilder::new(server.url())
        .output_dir(out.path().to_path_buf())
        .allow_private_ips(true)
        .max_pages(0)
        .format(OutputFormat::Json)
        .build()
        .unwrap();
    let fetcher = Fetcher::new(cfg).await.unwrap();
    let stats = fetcher.run().await.unwrap();
    fetcher.finalize().await.unwrap();

    assert_eq!(stats.urls_discovered, 0);
    assert_eq!(stats.pages_fetched, 0);
}
