//! Product card parsing
//!
//! Cards are parsed from the fully rendered page HTML with `scraper`. Every
//! field is required: the first card that fails to parse fails the whole page.

use crate::config::SelectorConfig;
use crate::product::Product;
use crate::{ProductError, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for product cards
#[derive(Debug, Clone)]
pub struct ProductSelectors {
    card: Selector,
    title: Selector,
    description: Selector,
    price: Selector,
    rating_star: Selector,
    review_count: Selector,
}

impl ProductSelectors {
    /// Compiles the card selectors from configuration
    pub fn compile(config: &SelectorConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            card: compile_selector(&config.product_card)?,
            title: compile_selector(&config.title)?,
            description: compile_selector(&config.description)?,
            price: compile_selector(&config.price)?,
            rating_star: compile_selector(&config.rating_star)?,
            review_count: compile_selector(&config.review_count)?,
        })
    }
}

pub(crate) fn compile_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector(format!("'{}': {:?}", selector, e)))
}

/// Parses every product card in a rendered page
///
/// # Arguments
///
/// * `html` - The rendered page HTML
/// * `page_url` - URL of the page, used in error reports
/// * `selectors` - Compiled card selectors
///
/// # Returns
///
/// * `Ok(Vec<Product>)` - One product per card, in document order
/// * `Err(ScrapeError::Product)` - The first card that failed to parse
pub fn parse_products(
    html: &str,
    page_url: &str,
    selectors: &ProductSelectors,
) -> Result<Vec<Product>, ScrapeError> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.card)
        .enumerate()
        .map(|(index, card)| {
            parse_card(card, selectors).map_err(|source| ScrapeError::Product {
                url: page_url.to_string(),
                index,
                source,
            })
        })
        .collect()
}

/// Parses a single product card
pub fn parse_card(card: ElementRef<'_>, selectors: &ProductSelectors) -> Result<Product, ProductError> {
    let title = find(card, &selectors.title, "title")?
        .value()
        .attr("title")
        .ok_or(ProductError::MissingAttribute {
            field: "title",
            attribute: "title",
        })?
        .to_string();

    let description = element_text(find(card, &selectors.description, "description")?);
    let price = parse_price(&element_text(find(card, &selectors.price, "price")?))?;
    let rating = star_rating(card.select(&selectors.rating_star).count())?;
    let num_of_reviews =
        parse_review_count(&element_text(find(card, &selectors.review_count, "num_of_reviews")?))?;

    Ok(Product {
        title,
        description,
        price,
        rating,
        num_of_reviews,
    })
}

fn find<'a>(
    card: ElementRef<'a>,
    selector: &Selector,
    field: &'static str,
) -> Result<ElementRef<'a>, ProductError> {
    card.select(selector)
        .next()
        .ok_or(ProductError::MissingElement { field })
}

/// Visible text with runs of whitespace collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Parses "$24.99" style prices
///
/// Only a leading currency symbol is stripped; a sign is kept.
fn parse_price(text: &str) -> Result<f64, ProductError> {
    let amount = text
        .trim()
        .trim_start_matches(is_currency_symbol)
        .trim();

    amount
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| ProductError::InvalidNumber {
            field: "price",
            value: text.to_string(),
        })
}

fn star_rating(stars: usize) -> Result<u32, ProductError> {
    u32::try_from(stars).map_err(|_| ProductError::InvalidNumber {
        field: "rating",
        value: stars.to_string(),
    })
}

fn is_currency_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '.' | '+' | '-')
}

/// Parses the leading number of "13 reviews"
fn parse_review_count(text: &str) -> Result<u32, ProductError> {
    text.split_whitespace()
        .next()
        .and_then(|count| count.parse::<u32>().ok())
        .ok_or_else(|| ProductError::InvalidNumber {
            field: "num_of_reviews",
            value: text.to_string(),
        })
}
