//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end through the HTTP collaborators.

use babel_ripple::config::Config;
use babel_ripple::crawler::{run_crawl, Coordinator, CrawlPhase};
use babel_ripple::{BabelError, LanguageBucket, SeedError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from the given static seeds
fn create_test_config(seeds: Vec<String>) -> Config {
    let mut config = Config::default();
    config.crawler.request_delay_ms = 0;
    config.crawler.request_timeout_ms = 2_000;
    config.crawler.sample_rate = 0.0;
    config.crawler.rng_seed = Some(42);
    config.seeds.urls = seeds;
    config
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{}/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="/private/secret">Secret</a>
            <a href="/report.pdf">Report</a>
            <a href="mailto:webmaster@example.com">Mail</a>
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(
            r#"<html><body><a href="/">Home</a><a href="/page2#top">Page 2</a></body></html>"#.to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html("<html><body><p>Leaf</p></body></html>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(html("<html></html>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF", "application/pdf"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}/", base_url)]);
    let stats = run_crawl(&config, "").await.expect("crawl should succeed");

    assert_eq!(stats.crawled, 3);
    assert_eq!(stats.sampled, 0);
}

#[tokio::test]
async fn test_non_html_and_errors_not_counted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/data.json">Data</a><a href="/empty">Empty</a><a href="/gone">Gone</a>"#.to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(html("   ".to_string()))
        .mount(&mock_server)
        .await;

    // Error statuses are not filtered: a 404 page with an HTML body still counts
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("<p>Not found</p>", "text/html"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}/", base_url)]);
    let stats = run_crawl(&config, "").await.expect("crawl should succeed");

    assert_eq!(stats.crawled, 2);
}

#[tokio::test]
async fn test_budget_limits_fetches() {
    let mock_server = MockServer::start().await;

    let links: String = (0..20).map(|i| format!(r#"<a href="/p{}">p{}</a>"#, i, i)).collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!("<html><body>{}</body></html>", links)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(html("<html><body>leaf</body></html>".to_string()))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(vec![format!("{}/", mock_server.uri())]);
    config.crawler.budget = 5;

    let mut coordinator = Coordinator::new(&config).expect("coordinator should build");
    assert_eq!(coordinator.seed(&config.seeds.urls), 1);

    let stats = coordinator.run().await.clone();

    assert_eq!(stats.crawled, 5);
    assert_eq!(coordinator.phase(), CrawlPhase::Done);
    assert_eq!(coordinator.state().frontier.len(), 16);

    // 5 pages plus one robots.txt request
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 6);
}

#[tokio::test]
async fn test_language_sampling_over_site() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html lang="en"><body><a href="/zh">zh</a><a href="/es">es</a><a href="/pl">pl</a></body></html>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    for (page, lang) in [("/zh", "zh-Hans"), ("/es", "es-AR"), ("/pl", "pl")] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html(format!(r#"<html lang="{}"><body>text</body></html>"#, lang)))
            .mount(&mock_server)
            .await;
    }

    let mut config = create_test_config(vec![format!("{}/", mock_server.uri())]);
    config.crawler.sample_rate = 1.0;

    let stats = run_crawl(&config, "").await.expect("crawl should succeed");

    assert_eq!(stats.crawled, 4);
    assert_eq!(stats.sampled, 4);
    assert_eq!(stats.count(LanguageBucket::Chinese), 1);
    assert_eq!(stats.count(LanguageBucket::Spanish), 1);
    assert_eq!(stats.count(LanguageBucket::Polish), 1);
    assert_eq!(stats.count(LanguageBucket::Other), 1);
    assert_eq!(stats.fraction(LanguageBucket::Polish), Some(0.25));
}

#[tokio::test]
async fn test_seed_search_failure_is_fatal() {
    let search_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&search_server)
        .await;

    let mut config = create_test_config(Vec::new());
    config.seeds.search_url = format!("{}/search?q={{query}}", search_server.uri());

    let result = run_crawl(&config, "noticias").await;

    assert!(matches!(
        result,
        Err(BabelError::Seeds(SeedError::Status { status: 500 }))
    ));
}

#[tokio::test]
async fn test_empty_search_results_end_crawl() {
    let search_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html("<html><body>No results</body></html>".to_string()))
        .mount(&search_server)
        .await;

    let mut config = create_test_config(Vec::new());
    config.seeds.search_url = format!("{}/search?q={{query}}", search_server.uri());

    let stats = run_crawl(&config, "xyzzy").await.expect("empty seeds are not an error");
    assert_eq!(stats.crawled, 0);
}
