//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_harvester::config::UserAgentConfig;
use site_harvester::crawler::crawl;
use site_harvester::http::build_http_client;
use site_harvester::output::DataDir;
use std::collections::HashSet;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> reqwest::Client {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    build_http_client(&user_agent, Duration::from_secs(5)).expect("Failed to build client")
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_crawl_visits_each_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // A -> {B, C}, B -> {A, C#section}, C -> nothing
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{0}/b">B</a>
            <a href="/c">C</a>
            <a href="https://external.example.org/">Elsewhere</a>
            <img src="/logo.png">
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html(
            r#"<html><head><title>B</title></head><body>
            <a href="/">Home</a>
            <a href="/c#section">C again</a>
            </body></html>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(html(
            "<html><head><title>C</title></head><body><p>Leaf page</p></body></html>".to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pages = crawl(test_client(), &format!("{}/", base_url), 10, Duration::ZERO)
        .await
        .expect("Crawl failed");

    assert_eq!(pages.len(), 3, "Each page should be visited exactly once");
    assert!(pages.iter().all(|p| p.is_ok()));

    let urls: HashSet<&str> = pages.iter().map(|p| p.url.as_str()).collect();
    let expected: HashSet<String> = ["/", "/b", "/c"]
        .iter()
        .map(|p| format!("{}{}", base_url, p))
        .collect();
    assert_eq!(urls, expected.iter().map(|s| s.as_str()).collect());

    let home = &pages[0];
    assert_eq!(home.title, "Home");
    assert_eq!(home.internal_link_count, 2);
    assert_eq!(home.external_link_count, 1);
    assert_eq!(home.image_count, 1);
}

#[tokio::test]
async fn test_crawl_respects_max_pages() {
    let mock_server = MockServer::start().await;

    let links: String = (1..=5)
        .map(|i| format!(r#"<a href="/p{}">Page {}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!("<html><body>{}</body></html>", links)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(html("<html><body>Leaf</body></html>".to_string()))
        .mount(&mock_server)
        .await;

    let pages = crawl(
        test_client(),
        &format!("{}/", mock_server.uri()),
        2,
        Duration::ZERO,
    )
    .await
    .unwrap();

    assert_eq!(pages.len(), 2);
}

#[tokio::test]
async fn test_crawl_records_failures_and_skips_non_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body>
            <a href="/missing">Gone</a>
            <a href="/report.pdf">Report</a>
            </body></html>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    // Links inside a non-HTML body must not be followed
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/hidden">hidden</a>"#)
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hidden"))
        .respond_with(html("<html></html>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let pages = crawl(
        test_client(),
        &format!("{}/", mock_server.uri()),
        10,
        Duration::ZERO,
    )
    .await
    .unwrap();

    assert_eq!(pages.len(), 3);

    let missing = pages
        .iter()
        .find(|p| p.url.ends_with("/missing"))
        .expect("404 page should be recorded");
    assert_eq!(missing.status_code, Some(404));
    assert_eq!(missing.error.as_deref(), Some("HTTP 404"));

    let pdf = pages
        .iter()
        .find(|p| p.url.ends_with("/report.pdf"))
        .unwrap();
    assert!(pdf.is_ok());
    assert_eq!(pdf.internal_link_count, 0);
}

#[tokio::test]
async fn test_site_map_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><head><title>Home, "quoted"</title>
            <meta name="description" content="Department home"></head>
            <body>Hello world</body></html>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let pages = crawl(
        test_client(),
        &format!("{}/", mock_server.uri()),
        5,
        Duration::ZERO,
    )
    .await
    .unwrap();

    let temp_dir = TempDir::new().unwrap();
    let data_dir = DataDir::new(temp_dir.path());
    data_dir.save_site_map(&pages).unwrap();

    let loaded = data_dir.load_site_map().unwrap();
    assert_eq!(loaded, pages);
    assert_eq!(loaded[0].description, "Department home");
    assert!(data_dir.csv_path("site-map").exists());
}
