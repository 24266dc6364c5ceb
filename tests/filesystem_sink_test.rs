//! Filesystem-sink assertions for the default Markdown output format, run
//! end-to-end through [`Fetcher`] against a mock HTTP server.

use assert_fs::prelude::*;
use docpull_rs::{FetchConfigBuilder, Fetcher, NamingStrategy, OutputFormat};

#[tokio::test]
async fn markdown_sink_writes_one_file_per_page_under_output_dir() {
    let mut server = mockito::Server::new_async().await;

    let _robots = server.mock("GET", "/robots.txt").with_status(404).create_async().await;
    let _sitemap = server
        .mock("GET", "/sitemap.xml")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(format!(
            r#"<?xml version="1.0"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/guide</loc></url>
</urlset>"#,
            base = server.url()
        ))
        .create_async()
        .await;
    let _page = server
        .mock("GET", "/guide")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><head><title>Guide</title></head><body><main><p>Guide body</p></main></body></html>")
        .create_async()
        .await;

    let out = assert_fs::TempDir::new().unwrap();
    let config = FetchConfigBuilder::new(server.url())
        .output_dir(out.path().to_path_buf())
        .allow_private_ips(true)
        .naming_strategy(NamingStrategy::Flat)
        .format(OutputFormat::Markdown)
        .build()
        .unwrap();

    let fetcher = Fetcher::new(config).await.unwrap();
    let stats = fetcher.run().await.unwrap();
    assert_eq!(stats.pages_fetched, 1);

    out.child("guide.md").assert(predicates::str::contains("Guide body"));
}
