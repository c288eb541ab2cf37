//! Integration tests for the link validator
//!
//! A wiremock server plays the checked site; the validator probes it with a
//! short client timeout so slow endpoints turn into timeout records.

use site_harvester::config::UserAgentConfig;
use site_harvester::crawler::crawl;
use site_harvester::http::build_http_client;
use site_harvester::validator::{harvest_links, LinkTarget, LinkValidator, ValidationReport};
use site_harvester::StatusBucket;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(1);

fn test_client(timeout: Duration) -> reqwest::Client {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    build_http_client(&user_agent, timeout).expect("Failed to build client")
}

async fn mount_site(server: &MockServer) {
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(server)
        .await;

    let moved_to = format!("{}/ok", server.uri());
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", moved_to.as_str()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_validator_classifies_each_link() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let source = format!("{}/", base_url);
    let targets: Vec<LinkTarget> = ["/ok", "/missing", "/broken", "/slow", "/old"]
        .iter()
        .map(|p| LinkTarget::new(format!("{}{}", base_url, p), source.clone()))
        .collect();

    let validator = LinkValidator::with_client(test_client(TIMEOUT), 2, TIMEOUT);
    let records = validator.validate(targets).await;
    assert_eq!(records.len(), 5, "One record per target");

    let find = |suffix: &str| {
        records
            .iter()
            .find(|r| r.url.ends_with(suffix))
            .unwrap_or_else(|| panic!("No record for {}", suffix))
    };

    let ok = find("/ok");
    assert_eq!(ok.status_bucket, StatusBucket::Ok);
    assert_eq!(ok.status_code, Some(200));
    assert!(!ok.is_redirect);
    assert_eq!(ok.source_page, source);

    assert_eq!(find("/missing").status_bucket, StatusBucket::NotFound);
    assert_eq!(find("/broken").status_bucket, StatusBucket::ServerError);

    let slow = find("/slow");
    assert_eq!(slow.status_bucket, StatusBucket::Timeout);
    assert_eq!(slow.status_code, None);
    assert_eq!(slow.response_time_ms, 1000.0);
    assert_eq!(slow.error.as_deref(), Some("Request timeout"));

    let old = find("/old");
    assert_eq!(old.status_bucket, StatusBucket::Ok);
    assert!(old.is_redirect);
    assert_eq!(old.final_url.as_deref(), Some(format!("{}/ok", base_url).as_str()));

    let report = ValidationReport::build(&records, 3000);
    assert_eq!(report.total, 5);
    assert_eq!(report.broken.len(), 3);
    assert_eq!(report.count(StatusBucket::Ok), 2);
}

#[tokio::test]
async fn test_validator_never_exceeds_worker_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(6)
        .mount(&mock_server)
        .await;

    let source = format!("{}/", mock_server.uri());
    let targets: Vec<LinkTarget> = (1..=6)
        .map(|i| LinkTarget::new(format!("{}/page{}", mock_server.uri(), i), source.clone()))
        .collect();

    let validator = LinkValidator::with_client(
        test_client(Duration::from_secs(5)),
        2,
        Duration::from_secs(5),
    );
    let started = Instant::now();
    let records = validator.validate(targets).await;
    let elapsed = started.elapsed();

    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.status_bucket == StatusBucket::Ok));

    // Two at a time means three rounds of 500ms; unbounded would take one
    assert!(
        elapsed >= Duration::from_millis(1400),
        "Checks ran more than two at a time: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_unreachable_host_is_an_error_record() {
    let validator = LinkValidator::with_client(test_client(TIMEOUT), 1, TIMEOUT);
    let records = validator
        .validate(vec![LinkTarget::new(
            "http://127.0.0.1:9/nothing",
            "http://127.0.0.1:9/",
        )])
        .await;

    assert_eq!(records.len(), 1);
    assert!(records[0].status_bucket.is_broken());
    assert!(records[0].error.is_some());
}

#[tokio::test]
async fn test_harvested_links_feed_the_validator() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r##"<html><body>
                    <a href="/ok">ok</a>
                    <a href="/ok#again">ok again</a>
                    <a href="/missing">missing</a>
                    <a href="mailto:someone@example.com">mail</a>
                    <a href="#top">top</a>
                    </body></html>"##,
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(Duration::from_secs(5));
    let seed = format!("{}/", mock_server.uri());

    // Only the seed page is crawled; its links are harvested separately
    let pages = crawl(client.clone(), &seed, 1, Duration::ZERO).await.unwrap();
    assert_eq!(pages.len(), 1);

    let targets = harvest_links(&client, &pages, Duration::ZERO).await;
    assert_eq!(targets.len(), 2, "Fragments collapse and non-HTTP links are skipped");
    assert!(targets.iter().all(|t| t.source_page == seed));

    let validator = LinkValidator::with_client(test_client(TIMEOUT), 2, TIMEOUT);
    let records = validator.validate(targets).await;
    let broken: Vec<_> = records.iter().filter(|r| r.status_bucket.is_broken()).collect();
    assert_eq!(broken.len(), 1);
    assert!(broken[0].url.ends_with("/missing"));
}
