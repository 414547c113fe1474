use crate::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Main configuration structure for Catalog-Harvest
///
/// Every section has defaults that target the webscraper.io "load more"
/// catalog, so an empty document is a complete configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub browser: BrowserConfig,
    pub render: RenderConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Where the catalog lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that navigation hrefs are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Page whose navigation menu lists the categories
    #[serde(rename = "home-url")]
    pub home_url: String,
}

impl SiteConfig {
    /// Parses the base URL
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("base-url '{}': {}", self.base_url, e)))
    }

    /// Parses the home URL
    pub fn home_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.home_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("home-url '{}': {}", self.home_url, e)))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://webscraper.io/".to_string(),
            home_url: "https://webscraper.io/test-sites/e-commerce/more/".to_string(),
        }
    }
}

/// Plain HTTP client settings used for navigation discovery
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("catalog-harvest/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

/// Headless browser settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub headless: bool,

    /// Chrome/Chromium binary; searched on the system when absent
    pub executable: Option<PathBuf>,

    /// Timeout for a single DevTools request, in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Additional command-line switches, e.g. "--no-sandbox" in containers
    #[serde(rename = "extra-args")]
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            request_timeout_secs: 30,
            extra_args: Vec::new(),
        }
    }
}

/// Page readiness settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Delay after each load-more click (milliseconds)
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,

    /// Upper bound on load-more clicks for a single page
    #[serde(rename = "max-load-more-clicks")]
    pub max_load_more_clicks: u32,
}

impl RenderConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            max_load_more_clicks: 500,
        }
    }
}

/// CSS selectors for the catalog markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// Top-level navigation entries
    pub nav_item: String,
    /// Anchor inside a navigation entry
    pub nav_link: String,
    /// Marker present on navigation entries that have subcategories
    pub expand_indicator: String,
    /// Container of the second navigation level on a category page
    pub subcategory_container: String,
    /// Subcategory anchors inside the container
    pub subcategory_link: String,
    pub consent_button: String,
    pub load_more: String,
    pub product_card: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub rating_star: String,
    pub review_count: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            nav_item: ".flex-column > .nav-item".to_string(),
            nav_link: "a[href]".to_string(),
            expand_indicator: ".ws-icon-right".to_string(),
            subcategory_container: ".nav-second-level".to_string(),
            subcategory_link: "a.subcategory-link[href]".to_string(),
            consent_button: ".acceptCookies".to_string(),
            load_more: ".ecomerce-items-scroll-more".to_string(),
            product_card: ".card-body".to_string(),
            title: ".title".to_string(),
            description: ".description".to_string(),
            price: ".price".to_string(),
            rating_star: ".ws-icon-star".to_string(),
            review_count: ".review-count".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CSV files are written to
    pub directory: PathBuf,

    /// URL segment that identifies the catalog's landing category
    #[serde(rename = "home-marker")]
    pub home_marker: String,

    /// File stem used for the landing category
    #[serde(rename = "home-name")]
    pub home_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            home_marker: "more".to_string(),
            home_name: "home".to_string(),
        }
    }
}
