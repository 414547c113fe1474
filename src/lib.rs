//! Catalog-Harvest: a product scraper for the webscraper.io e-commerce demo
//!
//! This crate discovers the category tree of the demo catalog, renders each
//! category page in a headless browser until its "load more" pagination is
//! exhausted, extracts product records and writes one CSV file per category.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod output;
pub mod product;
pub mod render;
pub mod url;

use thiserror::Error;

/// Main error type for Catalog-Harvest operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Browser setup error: {0}")]
    BrowserSetup(String),

    #[error("Page script error: {0}")]
    Script(String),

    #[error("Failed to parse product #{index} on {url}: {source}")]
    Product {
        url: String,
        index: usize,
        source: ProductError,
    },

    #[error("Load-more control on {url} still visible after {clicks} clicks")]
    LoadMoreNotSettled { url: String, clicks: u32 },

    #[error("Invalid render state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: render::RenderState,
        to: render::RenderState,
    },

    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Returns true if the coordinator may skip the affected category and
    /// carry on with the next one
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::LoadMoreNotSettled { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Errors raised while turning a product card into a [`product::Product`]
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    #[error("missing element for field '{field}'")]
    MissingElement { field: &'static str },

    #[error("missing attribute '{attribute}' for field '{field}'")]
    MissingAttribute {
        field: &'static str,
        attribute: &'static str,
    },

    #[error("invalid number '{value}' for field '{field}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Result type alias for Catalog-Harvest operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_scrape, run_with_driver, CategoryLink, Coordinator, ScrapeSummary};
pub use product::Product;
pub use render::{PageDriver, RenderState, ScrapeDriver};
pub use crate::url::derive_file_name;
