//! Category discovery from the catalog's navigation menu
//!
//! The home page lists the top-level categories. Entries carrying an expand
//! indicator have subcategories, which are only listed on that entry's own
//! page, so discovery goes exactly two levels deep:
//!
//! ```text
//! home ─┬─ Home            (leaf)
//!       ├─ Computers   ▸ ──┬─ Laptops
//!       │                  └─ Tablets
//!       └─ Phones      ▸ ──── Touch
//! ```

use crate::config::{Config, OutputConfig, SelectorConfig};
use crate::crawler::fetch_html;
use crate::product::extract::compile_selector;
use crate::url::{derive_file_name, resolve_href};
use crate::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// A category to scrape and the file its products go to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub file_name: String,
    pub url: Url,
}

/// A top-level navigation entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// The entry's href as written in the page
    pub href: String,

    /// True if the entry has subcategories
    pub expandable: bool,
}

/// Compiled selectors for the navigation menu
#[derive(Debug, Clone)]
pub struct NavSelectors {
    item: Selector,
    link: Selector,
    expand_indicator: Selector,
    subcategory_container: Selector,
    subcategory_link: Selector,
}

impl NavSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            item: compile_selector(&config.nav_item)?,
            link: compile_selector(&config.nav_link)?,
            expand_indicator: compile_selector(&config.expand_indicator)?,
            subcategory_container: compile_selector(&config.subcategory_container)?,
            subcategory_link: compile_selector(&config.subcategory_link)?,
        })
    }
}

/// Extracts the top-level navigation entries in document order
///
/// Entries without a link are skipped.
pub fn parse_nav_items(html: &str, selectors: &NavSelectors) -> Vec<NavItem> {
    let document = Html::parse_document(html);
    let mut items = Vec::new();

    for item in document.select(&selectors.item) {
        let href = item
            .select(&selectors.link)
            .next()
            .and_then(|link| link.value().attr("href"));

        let Some(href) = href else {
            tracing::warn!("Skipping navigation entry without a link");
            continue;
        };

        items.push(NavItem {
            href: href.to_string(),
            expandable: item.select(&selectors.expand_indicator).next().is_some(),
        });
    }

    items
}

/// Extracts subcategory hrefs from a category page in document order
///
/// A page without a second navigation level yields an empty list.
pub fn parse_subcategory_links(html: &str, selectors: &NavSelectors) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.subcategory_container)
        .flat_map(|container| container.select(&selectors.subcategory_link))
        .filter_map(|link| link.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Collects the absolute URL of every category and subcategory
///
/// Fetches the home page, then the page of every expandable entry. Each
/// top-level URL is followed by its subcategories.
///
/// # Returns
///
/// * `Ok(Vec<Url>)` - Category URLs in discovery order
/// * `Err(ScrapeError::Http)` - A page could not be fetched
pub async fn discover_category_urls(client: &Client, config: &Config) -> Result<Vec<Url>> {
    let base_url = config.site.base_url()?;
    let home_url = config.site.home_url()?;
    let selectors = NavSelectors::compile(&config.selectors)?;

    tracing::info!("Discovering categories from {}", home_url);
    let home_html = fetch_html(client, &home_url).await?;

    let mut urls = Vec::new();
    for item in parse_nav_items(&home_html, &selectors) {
        let Some(category_url) = resolve(&item.href, &base_url) else {
            continue;
        };
        urls.push(category_url.clone());

        if !item.expandable {
            continue;
        }

        let category_html = fetch_html(client, &category_url).await?;
        let subcategories = parse_subcategory_links(&category_html, &selectors);
        tracing::debug!(
            "{} has {} subcategories",
            category_url,
            subcategories.len()
        );

        urls.extend(
            subcategories
                .iter()
                .filter_map(|href| resolve(href, &base_url)),
        );
    }

    tracing::info!("Discovered {} categories", urls.len());
    Ok(urls)
}

fn resolve(href: &str, base_url: &Url) -> Option<Url> {
    let resolved = resolve_href(href, base_url);
    if resolved.is_none() {
        tracing::warn!("Ignoring navigation href '{}'", href);
    }
    resolved
}

/// Pairs every URL with its output file name
pub fn name_category_links(urls: Vec<Url>, naming: &OutputConfig) -> Vec<CategoryLink> {
    urls.into_iter()
        .map(|url| CategoryLink {
            file_name: derive_file_name(&url, naming),
            url,
        })
        .collect()
}

/// Discovers every category and names its output file
pub async fn discover_categories(client: &Client, config: &Config) -> Result<Vec<CategoryLink>> {
    let urls = discover_category_urls(client, config).await?;
    Ok(name_category_links(urls, &config.output))
}
