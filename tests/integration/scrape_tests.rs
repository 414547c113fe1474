//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to serve the navigation pages and a scripted
//! in-memory page driver in place of the browser.

use async_trait::async_trait;
use catalog_harvest::config::Config;
use catalog_harvest::crawler::{
    build_http_client, discover_categories, run_with_driver, Coordinator,
};
use catalog_harvest::render::{PageDriver, Renderer, ScrapeDriver};
use catalog_harvest::{Result, ScrapeError, ScrapeSummary};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOAD_MORE: &str = ".ecomerce-items-scroll-more";

const ONE_PRODUCT: &str = r#"<html><body>
    <div class="card-body">
        <h4 class="price">$24.99</h4>
        <a class="title" title="Nokia 123">Nokia 123</a>
        <p class="description">7 day battery</p>
        <p class="review-count">13 reviews</p>
        <p><span class="ws-icon-star"></span><span class="ws-icon-star"></span><span class="ws-icon-star"></span></p>
    </div>
</body></html>"#;

const BROKEN_PRODUCT: &str = r#"<html><body>
    <div class="card-body"><a class="title" title="No price">No price</a></div>
</body></html>"#;

/// Serves the same page for every URL, except for the configured overrides
#[derive(Default)]
struct StubDriver {
    navigations: Vec<String>,
    current: String,
    /// URLs whose load-more control never hides
    stuck: HashSet<String>,
    /// URLs serving malformed product cards
    broken: HashSet<String>,
    load_more_clicks: u32,
    /// Shared so it can be read after the driver is consumed by `close`
    closes: Arc<AtomicU32>,
    fail_close: bool,
}

#[async_trait]
impl PageDriver for StubDriver {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        self.current = url.to_string();
        Ok(())
    }

    async fn exists(&mut self, selector: &str) -> Result<bool> {
        Ok(selector == LOAD_MORE && self.stuck.contains(&self.current))
    }

    async fn is_visible(&mut self, selector: &str) -> Result<bool> {
        self.exists(selector).await
    }

    async fn click(&mut self, _selector: &str) -> Result<()> {
        self.load_more_clicks += 1;
        Ok(())
    }

    async fn content(&mut self) -> Result<String> {
        if self.broken.contains(&self.current) {
            Ok(BROKEN_PRODUCT.to_string())
        } else {
            Ok(ONE_PRODUCT.to_string())
        }
    }
}

#[async_trait]
impl ScrapeDriver for StubDriver {
    async fn close(self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(ScrapeError::BrowserSetup("browser already gone".to_string()));
        }
        Ok(())
    }
}

const HOME_PAGE: &str = r#"<html><body>
    <ul class="nav flex-column" id="side-menu">
        <li class="nav-item">
            <a href="/test-sites/e-commerce/more" class="nav-link">Home</a>
        </li>
        <li class="nav-item">
            <a href="/test-sites/e-commerce/more/computers" class="category-link">
                Computers <span class="ws-icon ws-icon-right"></span>
            </a>
        </li>
    </ul>
</body></html>"#;

const COMPUTERS_PAGE: &str = r#"<html><body>
    <ul class="nav flex-column" id="side-menu">
        <li class="nav-item">
            <a href="/test-sites/e-commerce/more" class="nav-link">Home</a>
        </li>
        <li class="nav-item">
            <a href="/test-sites/e-commerce/more/computers" class="category-link active">Computers</a>
            <ul class="nav nav-second-level">
                <li class="nav-item">
                    <a href="/test-sites/e-commerce/more/computers/laptops" class="subcategory-link">Laptops</a>
                </li>
                <li class="nav-item">
                    <a href="/test-sites/e-commerce/more/computers/tablets" class="subcategory-link">Tablets</a>
                </li>
            </ul>
        </li>
    </ul>
</body></html>"#;

/// Starts a mock catalog with a two-level navigation menu
async fn start_catalog() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-sites/e-commerce/more"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(HOME_PAGE)
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/test-sites/e-commerce/more/computers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(COMPUTERS_PAGE)
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    server
}

/// Creates a test configuration pointing at the mock catalog
fn create_test_config(server: &MockServer, output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/", server.uri());
    config.site.home_url = format!("{}/test-sites/e-commerce/more", server.uri());
    config.render.poll_interval_ms = 0;
    config.render.max_load_more_clicks = 3;
    config.output.directory = output_dir.to_path_buf();
    config
}

fn coordinator(config: Config, driver: StubDriver) -> Coordinator<StubDriver> {
    let client = build_http_client(&config.http).expect("Failed to build client");
    let renderer = Renderer::from_config(&config).expect("Failed to build renderer");
    Coordinator::new(config, client, renderer, driver)
}

/// Runs a full scrape through the same path as the CLI, closing the driver
async fn run_and_close(config: Config, driver: StubDriver) -> Result<ScrapeSummary> {
    let client = build_http_client(&config.http).expect("Failed to build client");
    let renderer = Renderer::from_config(&config).expect("Failed to build renderer");
    run_with_driver(config, client, renderer, driver).await
}

fn expected_urls(server: &MockServer) -> Vec<String> {
    let base = format!("{}/test-sites/e-commerce/more", server.uri());
    vec![
        base.clone(),
        format!("{}/computers", base),
        format!("{}/computers/laptops", base),
        format!("{}/computers/tablets", base),
    ]
}

#[tokio::test]
async fn test_discovery_order_and_names() {
    let server = start_catalog().await;
    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());
    let client = build_http_client(&config.http).unwrap();

    let links = discover_categories(&client, &config).await.unwrap();

    let names: Vec<&str> = links.iter().map(|l| l.file_name.as_str()).collect();
    assert_eq!(names, vec!["home.csv", "computers.csv", "laptops.csv", "tablets.csv"]);

    let urls: Vec<String> = links.iter().map(|l| l.url.to_string()).collect();
    assert_eq!(urls, expected_urls(&server));
}

#[tokio::test]
async fn test_full_scrape_writes_one_file_per_category() {
    let server = start_catalog().await;
    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());

    let mut coordinator = coordinator(config, StubDriver::default());
    let summary = coordinator.run().await.expect("Scrape failed");

    assert_eq!(summary.categories_written, 4);
    assert_eq!(summary.products_written, 4);
    assert!(summary.categories_skipped.is_empty());

    let driver = coordinator.into_driver();
    assert_eq!(driver.navigations, expected_urls(&server));

    for name in ["home.csv", "computers.csv", "laptops.csv", "tablets.csv"] {
        let content = std::fs::read_to_string(output.path().join(name))
            .unwrap_or_else(|e| panic!("{name} not written: {e}"));
        assert_eq!(
            content,
            "title,description,price,rating,num_of_reviews\r\nNokia 123,7 day battery,24.99,3,13\r\n"
        );
    }
}

#[tokio::test]
async fn test_unsettled_page_is_skipped() {
    let server = start_catalog().await;
    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());

    let laptops = format!("{}/test-sites/e-commerce/more/computers/laptops", server.uri());
    let driver = StubDriver {
        stuck: HashSet::from([laptops.clone()]),
        ..Default::default()
    };

    let mut coordinator = coordinator(config, driver);
    let summary = coordinator.run().await.expect("Scrape failed");

    assert_eq!(summary.categories_written, 3);
    assert_eq!(summary.categories_skipped, vec![laptops]);
    assert_eq!(coordinator.into_driver().load_more_clicks, 3);

    assert!(!output.path().join("laptops.csv").exists());
    assert!(output.path().join("tablets.csv").exists());
}

#[tokio::test]
async fn test_malformed_product_aborts_run() {
    let server = start_catalog().await;
    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());

    let computers = format!("{}/test-sites/e-commerce/more/computers", server.uri());
    let driver = StubDriver {
        broken: HashSet::from([computers.clone()]),
        ..Default::default()
    };

    let mut coordinator = coordinator(config, driver);
    let err = coordinator.run().await.unwrap_err();

    assert!(matches!(err, ScrapeError::Product { ref url, index: 0, .. } if *url == computers));

    // Files written before the failure stay, later categories are never visited
    assert!(output.path().join("home.csv").exists());
    assert!(!output.path().join("computers.csv").exists());
    assert!(!output.path().join("laptops.csv").exists());
    assert_eq!(coordinator.into_driver().navigations.len(), 2);
}

#[tokio::test]
async fn test_unreachable_subcategory_page_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test-sites/e-commerce/more"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HOME_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/test-sites/e-commerce/more/computers"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());
    let client = build_http_client(&config.http).unwrap();

    let err = discover_categories(&client, &config).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Http { .. }));
}

#[tokio::test]
async fn test_home_without_expandable_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<ul class="flex-column">
                <li class="nav-item"><a href="/shop/phones">Phones</a></li>
                <li class="nav-item"><a href="/shop/tablets">Tablets</a></li>
            </ul>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&server, output.path());
    config.site.home_url = format!("{}/shop", server.uri());
    let client = build_http_client(&config.http).unwrap();

    let links = discover_categories(&client, &config).await.unwrap();

    let names: Vec<&str> = links.iter().map(|l| l.file_name.as_str()).collect();
    assert_eq!(names, vec!["phones.csv", "tablets.csv"]);
}

#[tokio::test]
async fn test_driver_closed_after_successful_run() {
    let server = start_catalog().await;
    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());

    let driver = StubDriver::default();
    let closes = driver.closes.clone();

    let summary = run_and_close(config, driver).await.expect("Scrape failed");

    assert_eq!(summary.categories_written, 4);
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_driver_closed_after_failed_run() {
    let server = start_catalog().await;
    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());

    let computers = format!("{}/test-sites/e-commerce/more/computers", server.uri());
    let driver = StubDriver {
        broken: HashSet::from([computers]),
        ..Default::default()
    };
    let closes = driver.closes.clone();

    let err = run_and_close(config, driver).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Product { index: 0, .. }));
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_close_error_reported_after_successful_run() {
    let server = start_catalog().await;
    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());

    let driver = StubDriver {
        fail_close: true,
        ..Default::default()
    };
    let closes = driver.closes.clone();

    let err = run_and_close(config, driver).await.unwrap_err();

    assert!(matches!(err, ScrapeError::BrowserSetup(_)));
    assert_eq!(closes.load(Ordering::SeqCst), 1);
    // The scrape itself completed before the close failed
    assert!(output.path().join("tablets.csv").exists());
}

#[tokio::test]
async fn test_scrape_error_wins_over_close_error() {
    let server = start_catalog().await;
    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());

    let home = format!("{}/test-sites/e-commerce/more", server.uri());
    let driver = StubDriver {
        broken: HashSet::from([home.clone()]),
        fail_close: true,
        ..Default::default()
    };
    let closes = driver.closes.clone();

    let err = run_and_close(config, driver).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Product { ref url, .. } if *url == home));
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}
