//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and exercise
//! the full Scheduler/Worker/Logger path end to end, bypassing the
//! live seed-discovery adapter (seeds are pushed directly).

use std::sync::Arc;
use std::time::Duration;

use tempfile::NamedTempFile;
use wayfarer::config::UserAgentConfig;
use wayfarer::crawler::{build_http_client, Scheduler, WorkerContext};
use wayfarer::logger::Logger;
use wayfarer::robots::RobotsCache;
use wayfarer::state::SharedState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

async fn run_scheduler(
    seeds: Vec<String>,
    capacity: usize,
    max_pages: u64,
    max_timeouts: u32,
) -> (Arc<SharedState>, NamedTempFile) {
    let log_file = NamedTempFile::new().unwrap();
    let client = build_http_client(&test_user_agent()).unwrap();
    let state = Arc::new(SharedState::new());
    let logger = Arc::new(Logger::open(log_file.path()).unwrap());
    let robots = Arc::new(RobotsCache::new());

    let ctx = Arc::new(WorkerContext {
        client,
        robots,
        state: state.clone(),
        logger,
        user_agent: test_user_agent().header_value(),
        max_timeouts,
        debug: true,
    });

    let mut scheduler = Scheduler::new(ctx, capacity, max_pages, Duration::from_secs(30));
    scheduler.seed(seeds).await;
    scheduler.run().await.unwrap();

    (state, log_file)
}

#[tokio::test]
async fn test_full_crawl_follows_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    r#"<html><body>
                    <a href="{base_url}/page1">Page 1</a>
                    <a href="{base_url}/page2">Page 2</a>
                    </body></html>"#
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>page one</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>page two</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let (state, log_file) = run_scheduler(vec![base_url.clone()], 4, 10, 3).await;

    assert_eq!(state.visited_count(), 3);

    let content = std::fs::read_to_string(log_file.path()).unwrap();
    let url_lines = content
        .lines()
        .take_while(|line| !line.is_empty())
        .count();
    assert_eq!(url_lines, 3);
    assert!(content.contains("total pages: 3"));
}

#[tokio::test]
async fn test_max_pages_cap_is_enforced() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .mount(&mock_server)
        .await;

    // Every page links to every other page in a 20-page ring, so the
    // frontier never drains on its own before the cap kicks in.
    for i in 0..20 {
        let next = (i + 1) % 20;
        let links: String = (0..20)
            .map(|n| format!(r#"<a href="{base_url}/p{n}">p{n}</a>"#))
            .collect();
        let _ = next;
        Mock::given(method("GET"))
            .and(path(format!("/p{i}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("<html><body>{links}</body></html>"))
                    .insert_header("content-type", "text/html"),
            )
            .mount(&mock_server)
            .await;
    }

    let seed = format!("{base_url}/p0");
    let (state, log_file) = run_scheduler(vec![seed], 4, 5, 3).await;

    assert_eq!(state.visited_count(), 5);
    let content = std::fs::read_to_string(log_file.path()).unwrap();
    let url_lines = content
        .lines()
        .take_while(|line| !line.is_empty())
        .count();
    assert_eq!(url_lines, 5);
}

#[tokio::test]
async fn test_robots_failure_fails_open() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>hello</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let (state, _log_file) = run_scheduler(vec![base_url], 2, 5, 3).await;
    assert_eq!(state.visited_count(), 1);
}

#[tokio::test]
async fn test_no_duplicate_fetches() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    r#"<html><body>
                    <a href="{base_url}/page1">a</a>
                    <a href="{base_url}/page1">same link twice</a>
                    </body></html>"#
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>hi</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let (state, log_file) = run_scheduler(vec![base_url], 4, 10, 3).await;
    assert_eq!(state.visited_count(), 2);

    let content = std::fs::read_to_string(log_file.path()).unwrap();
    let page1_lines = content.lines().filter(|line| line.contains("/page1")).count();
    assert_eq!(page1_lines, 1);
}
