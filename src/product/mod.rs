//! Product records extracted from category pages
//!
//! A [`Product`] is built from one rendered product card and never changes
//! afterwards. [`extract`] holds the card parsing rules.

pub mod extract;

use serde::Serialize;

pub use extract::{parse_card, parse_products, ProductSelectors};

/// One product as listed on a category page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Full product name, read from the title attribute since the visible
    /// text may be ellipsized
    pub title: String,

    /// Short marketing blurb
    pub description: String,

    /// Price with the currency symbol stripped
    pub price: f64,

    /// Number of filled star icons
    pub rating: u32,

    pub num_of_reviews: u32,
}

impl Product {
    /// Column names in field order, used as the CSV header
    pub const FIELDS: [&'static str; 5] =
        ["title", "description", "price", "rating", "num_of_reviews"];
}
