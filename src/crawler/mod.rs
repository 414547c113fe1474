//! Crawler module for category discovery and scrape orchestration
//!
//! This module contains the scrape pipeline, including:
//! - HTTP fetching of the static navigation pages
//! - Navigation parsing and category discovery
//! - Sequential per-category render/extract/write coordination

mod coordinator;
mod discovery;
mod fetcher;

pub use coordinator::{run_scrape, run_with_driver, Coordinator, ScrapeSummary};
pub use discovery::{
    discover_categories, discover_category_urls, name_category_links, parse_nav_items,
    parse_subcategory_links, CategoryLink, NavItem, NavSelectors,
};
pub use fetcher::{build_http_client, fetch_html};
