//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, down to the text store on disk.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use text_scraper::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use text_scraper::crawler::{crawl, Coordinator, CrawlOptions, HttpTransport};
use text_scraper::output::TextFileSink;
use text_scraper::url::CrawlScope;
use text_scraper::LinkOutcome;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `seed_url` into `output_dir`
fn create_test_config(seed_url: &str, max_pages: usize, output_dir: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed_url: seed_url.to_string(),
            max_pages,
            politeness_delay_ms: 10, // Very short for testing
            ..CrawlerConfig::default()
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: Some("https://example.com/contact".to_string()),
            contact_email: Some("test@example.com".to_string()),
        },
        output: OutputConfig {
            directory: output_dir.display().to_string(),
        },
    }
}

/// Path of the text store the crawl of `server` writes to
fn store_path(server: &MockServer, output_dir: &Path) -> PathBuf {
    let scope = CrawlScope::new(&server.uri(), 1).expect("Failed to build scope");
    output_dir.join(scope.store_name())
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html; charset=utf-8")
}

async fn mount_robots(server: &MockServer, rules: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rules))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;

    // Index page: two internal links, one external, one excluded file type.
    // Fetched twice: once for header capture, once in the loop.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><head><title>Home</title></head><body>
            <nav><a href="/page1">Page 1</a></nav>
            <h1>Welcome</h1>
            <p>Front page text</p>
            <a href="{}/page2">Page 2</a>
            <a href="http://external.invalid/elsewhere">Elsewhere</a>
            <a href="/report.pdf">Report</a>
            </body></html>"#,
            base_url
        )))
        .expect(2)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/page1",
        r#"<html><body><h2>First</h2><p>One</p><a href="/">Home</a></body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/page2",
        r#"<html><body><h2>Second</h2><p>Two</p><a href="/page1">Again</a></body></html>"#,
    )
    .await;

    // Excluded by extension, should never be requested
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 10, output.path());
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages_processed, 3);
    assert_eq!(report.pages_persisted(), 3);
    assert_eq!(report.frontier_remaining, 0);
    assert!(report.headers_captured);

    let content = std::fs::read_to_string(store_path(&mock_server, output.path()))
        .expect("Store was not written");

    let order: Vec<usize> = [
        "================= Site Headers =================",
        "================= / =================",
        "================= /page1 =================",
        "================= /page2 =================",
    ]
    .iter()
    .map(|marker| content.find(marker).expect("Missing record"))
    .collect();
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));

    assert!(content.contains("\nWelcome\n"));
    assert!(content.contains("Front page text"));
    assert!(content.contains("\nFirst\n"));
    // Navigation links are followed but their text is not stored
    assert!(!content.contains("Page 1"));
    assert!(content.contains("Page 2"));

    // Wiremock verifies the expectations when mock_server drops
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    // robots.txt that disallows /admin
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin"))
        .expect(1) // Fetched once, then cached
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
        <a href="/allowed">Allowed Page</a>
        <a href="/admin">Admin Page</a>
        </body></html>"#,
    )
    .await;
    mount_page(&mock_server, "/allowed", "<p>Allowed content</p>").await;

    // Admin page (should never be called)
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(html("<p>Admin content</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", mock_server.uri()), 10, output.path());
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages_processed, 3);
    assert_eq!(report.pages_persisted(), 2);
    assert_eq!(report.count(LinkOutcome::RobotsDenied), 1);

    let content = std::fs::read_to_string(store_path(&mock_server, output.path()))
        .expect("Store was not written");
    assert!(content.contains("Allowed content"));
    assert!(!content.contains("Admin content"));
}

#[tokio::test]
async fn test_missing_robots_txt_denies_site() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    // No robots.txt mock: wiremock answers 404
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<p>Home</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", mock_server.uri()), 10, output.path());
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages_processed, 1);
    assert_eq!(report.count(LinkOutcome::RobotsDenied), 1);
    assert!(!report.headers_captured);
    assert!(!store_path(&mock_server, output.path()).exists());
}

#[tokio::test]
async fn test_crawl_with_page_budget() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;

    // A chain of pages: / -> /a -> /b -> /c
    mount_page(&mock_server, "/", r#"<a href="/a">a</a>"#).await;
    mount_page(&mock_server, "/a", r#"<a href="/b">b</a>"#).await;
    mount_page(&mock_server, "/b", r#"<a href="/c">c</a>"#).await;

    // Beyond the budget, should never be called
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(html("<p>too far</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", mock_server.uri()), 3, output.path());
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages_processed, 3);
    assert_eq!(report.frontier_remaining, 1);
}

#[tokio::test]
async fn test_content_type_handling() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
        <a href="/data">Data</a>
        <a href="/missing">Missing</a>
        </body></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"secret": "json"}"#, "application/json"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_raw("<h1>Not here</h1>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", mock_server.uri()), 10, output.path());
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages_processed, 3);
    assert_eq!(report.count(LinkOutcome::ContentRejected), 1);
    assert_eq!(report.count(LinkOutcome::NotLoaded), 1);
    assert_eq!(report.pages_persisted(), 1);

    let content = std::fs::read_to_string(store_path(&mock_server, output.path()))
        .expect("Store was not written");
    assert!(!content.contains("secret"));
    assert!(!content.contains("Not here"));
}

#[tokio::test]
async fn test_page_text_extraction_on_disk() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    mount_page(
        &mock_server,
        "/",
        "<html><head><title>Ignored title</title><style>p { color: red; }</style></head>\
         <body><header>Banner</header><script>var x = 1;</script>\
         <h3>Minor</h3><h2>Major</h2>\
         <p>Line one\nLine\ttwo</p><footer>Copyright</footer></body></html>",
    )
    .await;

    // Driven through the coordinator directly, so the test owns the sink
    let scope = CrawlScope::new(&format!("{}/", mock_server.uri()), 1).expect("Invalid seed");
    let config = create_test_config(scope.seed().as_str(), 1, output.path());
    let transport = HttpTransport::new(&config.user_agent).expect("Failed to build transport");
    let sink = TextFileSink::create(output.path()).expect("Failed to create sink");

    let options = CrawlOptions::from_config(&config);

    let mut coordinator = Coordinator::new(scope, transport, sink, options);
    let report = coordinator.run().await.expect("Crawl failed");
    assert_eq!(report.pages_persisted(), 1);

    let content = std::fs::read_to_string(store_path(&mock_server, output.path()))
        .expect("Store was not written");
    let page = content
        .split("================= / =================")
        .nth(1)
        .expect("Missing page record");

    assert!(page.starts_with("\n\n\nMajor\n"));
    assert!(page.contains("Line one Line two"));
    for hidden in ["Ignored title", "color: red", "Banner", "var x", "Copyright"] {
        assert!(!page.contains(hidden), "{:?} leaked into the store", hidden);
    }
}
