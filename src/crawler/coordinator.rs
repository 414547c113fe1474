//! Scrape coordinator - top-level orchestration
//!
//! This module ties the pieces together:
//! - Discovering category links over plain HTTP
//! - Rendering each category page through the page driver
//! - Writing each category's products to its CSV file
//!
//! Categories are processed one after another with a single driver.

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::crawler::{build_http_client, discover_categories, CategoryLink};
use crate::output::write_products;
use crate::render::{PageDriver, Renderer, ScrapeDriver};
use crate::Result;
use reqwest::Client;
use std::time::Instant;

/// Totals for one scrape run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Number of CSV files written
    pub categories_written: usize,

    /// Categories skipped because their page never settled
    pub categories_skipped: Vec<String>,

    /// Products written across all files
    pub products_written: usize,
}

/// Main scrape coordinator structure
pub struct Coordinator<D> {
    config: Config,
    client: Client,
    renderer: Renderer,
    driver: D,
}

impl<D: PageDriver> Coordinator<D> {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    /// * `client` - HTTP client used for discovery
    /// * `renderer` - Renderer built from the same configuration
    /// * `driver` - The page driver every category is rendered with
    pub fn new(config: Config, client: Client, renderer: Renderer, driver: D) -> Self {
        Self {
            config,
            client,
            renderer,
            driver,
        }
    }

    /// Runs the scrape
    ///
    /// 1. Discovers the (file name, url) pairs
    /// 2. Renders each category and extracts its products
    /// 3. Writes each category's CSV file
    ///
    /// Any error other than a page whose load-more control never settles
    /// aborts the run; files written so far are kept.
    pub async fn run(&mut self) -> Result<ScrapeSummary> {
        let start_time = Instant::now();
        let links = discover_categories(&self.client, &self.config).await?;

        std::fs::create_dir_all(&self.config.output.directory)?;

        let mut summary = ScrapeSummary::default();
        for (position, link) in links.iter().enumerate() {
            tracing::info!(
                "[{}/{}] Scraping {} -> {}",
                position + 1,
                links.len(),
                link.url,
                link.file_name
            );

            match self.process_category(link).await {
                Ok(count) => {
                    summary.categories_written += 1;
                    summary.products_written += count;
                }
                Err(e) if e.is_recoverable() => {
                    tracing::error!("Skipping {}: {}", link.url, e);
                    summary.categories_skipped.push(link.url.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Scrape completed: {} files, {} products, {} skipped in {:?}",
            summary.categories_written,
            summary.products_written,
            summary.categories_skipped.len(),
            start_time.elapsed()
        );

        Ok(summary)
    }

    /// Renders one category and writes its file
    async fn process_category(&mut self, link: &CategoryLink) -> Result<usize> {
        let products = self
            .renderer
            .render(&mut self.driver, link.url.as_str())
            .await?;

        let path = self.config.output.directory.join(&link.file_name);
        write_products(&path, &products)?;
        tracing::info!("Wrote {} products to {}", products.len(), path.display());

        Ok(products.len())
    }

    /// Returns the driver, e.g. to close it
    pub fn into_driver(self) -> D {
        self.driver
    }
}

/// Runs a complete scrape with a freshly launched browser
///
/// The browser is closed before returning, whether the scrape succeeded or
/// failed. A close failure is only returned if the scrape itself succeeded.
///
/// # Example
///
/// ```no_run
/// use catalog_harvest::config::Config;
/// use catalog_harvest::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_scrape(Config::default()).await?;
/// println!("{} files written", summary.categories_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config) -> Result<ScrapeSummary> {
    let client = build_http_client(&config.http)?;
    let renderer = Renderer::from_config(&config)?;
    let session = BrowserSession::launch(&config.browser).await?;

    run_with_driver(config, client, renderer, session).await
}

/// Runs a complete scrape with an already started driver, then closes it
///
/// The driver is closed exactly once. If both the scrape and the close
/// fail, the scrape error is returned and the close error is logged.
pub async fn run_with_driver<D: ScrapeDriver>(
    config: Config,
    client: Client,
    renderer: Renderer,
    driver: D,
) -> Result<ScrapeSummary> {
    let mut coordinator = Coordinator::new(config, client, renderer, driver);
    let outcome = coordinator.run().await;

    let closed = coordinator.into_driver().close().await;
    match (outcome, closed) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_error)) => {
            tracing::error!("Failed to close browser: {}", close_error);
            Err(e)
        }
    }
}
