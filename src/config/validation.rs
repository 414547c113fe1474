use crate::config::types::{
    BrowserConfig, Config, HttpConfig, OutputConfig, RenderConfig, SelectorConfig, SiteConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_browser_config(&config.browser)?;
    validate_render_config(&config.render)?;
    validate_selectors(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the catalog URLs
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;
    validate_http_url("home-url", &config.home_url)?;
    Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "http timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "browser request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if let Some(path) = &config.executable {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "browser executable cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the load-more loop bounds
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if config.max_load_more_clicks < 1 {
        return Err(ConfigError::Validation(format!(
            "max-load-more-clicks must be >= 1, got {}",
            config.max_load_more_clicks
        )));
    }

    Ok(())
}

/// Checks that every selector compiles
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    let selectors = [
        ("nav-item", &config.nav_item),
        ("nav-link", &config.nav_link),
        ("expand-indicator", &config.expand_indicator),
        ("subcategory-container", &config.subcategory_container),
        ("subcategory-link", &config.subcategory_link),
        ("consent-button", &config.consent_button),
        ("load-more", &config.load_more),
        ("product-card", &config.product_card),
        ("title", &config.title),
        ("description", &config.description),
        ("price", &config.price),
        ("rating-star", &config.rating_star),
        ("review-count", &config.review_count),
    ];

    for (key, selector) in selectors {
        if selector.trim().is_empty() {
            return Err(ConfigError::InvalidSelector(format!(
                "{} cannot be empty",
                key
            )));
        }

        Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("{} '{}': {:?}", key, selector, e))
        })?;
    }

    Ok(())
}

/// Validates file naming
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    for (key, value) in [
        ("home-marker", &config.home_marker),
        ("home-name", &config.home_name),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }

        if value.contains('/') {
            return Err(ConfigError::Validation(format!(
                "{} must be a single path segment, got '{}'",
                key, value
            )));
        }
    }

    Ok(())
}
