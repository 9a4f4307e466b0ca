//! Integration tests for the HTTP fetcher
//!
//! These tests use wiremock to stand in for web servers and the PDF
//! extraction service.

use seedcrawl::config::{Config, UserAgentConfig};
use seedcrawl::crawler::{
    build_http_client, ContentKind, DisabledPdfExtractor, ExtractionError, FetchError, Fetcher,
    HttpFetcher, HttpPdfExtractor,
};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_with_pdf_service(pdf_endpoint: Option<String>) -> HttpFetcher {
    let mut config = Config::default();
    config.crawler.request_timeout = 2;
    config.pdf.endpoint = pdf_endpoint;
    HttpFetcher::from_config(&config).expect("Failed to build fetcher")
}

fn page_url(server: &MockServer, p: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), p)).expect("Failed to parse URL")
}

#[tokio::test]
async fn test_fetch_html_returns_markup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Hello</body></html>")
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetched = fetcher_with_pdf_service(None)
        .fetch(&page_url(&server, "/"))
        .await
        .expect("Fetch failed");

    assert_eq!(fetched.kind, ContentKind::Markup);
    assert!(fetched.content.contains("Hello"));
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = fetcher_with_pdf_service(None)
        .fetch(&page_url(&server, "/missing"))
        .await;

    assert_eq!(result, Err(FetchError::Status(404)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), Duration::from_millis(300))
        .expect("Failed to build client");
    let fetcher = HttpFetcher::new(client, Arc::new(DisabledPdfExtractor));

    let result = fetcher.fetch(&page_url(&server, "/slow")).await;
    assert_eq!(result, Err(FetchError::Timeout));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 9 on test machines
    let url = Url::parse("http://127.0.0.1:9/").unwrap();
    let result = fetcher_with_pdf_service(None).fetch(&url).await;

    assert!(matches!(result, Err(FetchError::Network(_))));
}

#[tokio::test]
async fn test_pdf_by_extension_goes_to_extractor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF-1.4 binary".to_vec())
                .insert_header("content-type", "application/octet-stream"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/parse-pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"text":"Report body"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_with_pdf_service(Some(format!("{}/api/parse-pdf", server.uri())));
    let fetched = fetcher
        .fetch(&page_url(&server, "/files/report.pdf"))
        .await
        .expect("Fetch failed");

    assert_eq!(fetched.kind, ContentKind::Document);
    assert_eq!(fetched.content, "Report body");
}

#[tokio::test]
async fn test_pdf_by_content_type_goes_to_extractor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF-1.7".to_vec())
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"text":"From header"}"#))
        .mount(&server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(2))
        .expect("Failed to build client");
    let extractor = HttpPdfExtractor::new(client.clone(), format!("{}/parse", server.uri()));
    let fetcher = HttpFetcher::new(client, Arc::new(extractor));

    let fetched = fetcher
        .fetch(&page_url(&server, "/download"))
        .await
        .expect("Fetch failed");

    assert_eq!(fetched.kind, ContentKind::Document);
    assert_eq!(fetched.content, "From header");
}

#[tokio::test]
async fn test_pdf_without_extractor_is_extraction_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
        .mount(&server)
        .await;

    let result = fetcher_with_pdf_service(None)
        .fetch(&page_url(&server, "/doc.pdf"))
        .await;

    assert_eq!(
        result,
        Err(FetchError::Extraction(ExtractionError::Unavailable))
    );
}
