//! Integration tests for the media downloader
//!
//! Files are served by wiremock and written into a temporary asset tree.

use site_harvester::config::UserAgentConfig;
use site_harvester::downloader::{MediaDownloader, MediaTarget};
use site_harvester::http::build_http_client;
use site_harvester::output::DataDir;
use site_harvester::{HarvestError, MediaKind};
use std::path::Path;
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

/// Signature and IHDR header of a `width` x `height` PNG
fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

async fn mount_media(server: &MockServer) {
    for image in ["/img/a.png", "/img/copy.png"] {
        Mock::given(method("GET"))
            .and(path(image))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(png_bytes(2, 3))
                    .insert_header("content-type", "image/png"),
            )
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/files/syllabus.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF-1.4 syllabus".to_vec())
                .insert_header("content-type", "application/pdf"),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_same_url_twice_writes_one_file() {
    let mock_server = MockServer::start().await;
    mount_media(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();

    let mut downloader = MediaDownloader::with_client(test_client(), temp_dir.path(), Duration::ZERO);
    let url = format!("{}/img/a.png", mock_server.uri());

    let first = downloader
        .download(&url, MediaKind::Image)
        .await
        .unwrap()
        .expect("First download should be written");
    assert_eq!(first.kind, MediaKind::Image);
    assert_eq!(first.filename, "a.png");
    assert_eq!(first.dimensions.as_deref(), Some("2x3"));
    assert!(Path::new(&first.local_path).exists());

    let second = downloader.download(&url, MediaKind::Image).await.unwrap();
    assert!(second.is_none(), "Repeated content is skipped");

    assert_eq!(files_in(&temp_dir.path().join("images")), 1);
    assert_eq!(downloader.images().len(), 1);
}

#[tokio::test]
async fn test_identical_content_under_two_urls_is_deduplicated() {
    let mock_server = MockServer::start().await;
    mount_media(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();

    let mut downloader = MediaDownloader::with_client(test_client(), temp_dir.path(), Duration::ZERO);
    let targets = vec![
        MediaTarget::new(format!("{}/img/a.png", base_url), MediaKind::Image),
        MediaTarget::new(format!("{}/img/copy.png", base_url), MediaKind::Image),
        MediaTarget::new(format!("{}/files/syllabus.pdf", base_url), MediaKind::Document),
        MediaTarget::new(format!("{}/img/gone.png", base_url), MediaKind::Image),
    ];

    let stats = downloader.download_all(&targets).await;
    assert_eq!(stats.downloaded, 2);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.failed, 1);

    assert_eq!(files_in(&temp_dir.path().join("images")), 1);
    assert_eq!(files_in(&temp_dir.path().join("documents")), 1);
    assert_eq!(downloader.documents()[0].filename, "syllabus.pdf");

    let data_dir = DataDir::new(temp_dir.path().join("data"));
    data_dir
        .save_media_catalogs(downloader.images(), downloader.documents())
        .unwrap();
    assert!(data_dir.json_path("images-catalog").exists());
    assert!(data_dir.csv_path("documents-catalog").exists());
}

#[tokio::test]
async fn test_http_error_is_reported() {
    let mock_server = MockServer::start().await;
    mount_media(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();

    let mut downloader = MediaDownloader::with_client(test_client(), temp_dir.path(), Duration::ZERO);
    let result = downloader
        .download(&format!("{}/img/gone.png", mock_server.uri()), MediaKind::Image)
        .await;

    assert!(matches!(result, Err(HarvestError::HttpStatus { status: 404, .. })));
    assert_eq!(files_in(&temp_dir.path().join("images")), 0);
}
