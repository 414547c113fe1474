//! Category page rendering
//!
//! Drives a page through `Loaded -> ConsentChecked -> Expanded -> Extracted`:
//! navigate, dismiss the cookie overlay, click "load more" until it hides,
//! then parse the product cards out of the rendered HTML.

use crate::config::Config;
use crate::product::{parse_products, Product, ProductSelectors};
use crate::render::{PageDriver, RenderState};
use crate::{Result, ScrapeError};
use std::time::Duration;

/// Renders category pages and extracts their products
#[derive(Debug, Clone)]
pub struct Renderer {
    products: ProductSelectors,
    consent_selector: String,
    load_more_selector: String,
    poll_interval: Duration,
    max_load_more_clicks: u32,
}

impl Renderer {
    /// Creates a renderer from the selector and render settings
    ///
    /// # Returns
    ///
    /// * `Ok(Renderer)` - Selectors compiled successfully
    /// * `Err(ScrapeError::Selector)` - A product selector failed to compile
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            products: ProductSelectors::compile(&config.selectors)?,
            consent_selector: config.selectors.consent_button.clone(),
            load_more_selector: config.selectors.load_more.clone(),
            poll_interval: config.render.poll_interval(),
            max_load_more_clicks: config.render.max_load_more_clicks,
        })
    }

    /// Renders a category page and returns every product on it
    ///
    /// The driver is left pointing at `url`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Product>)` - Products of the fully expanded page
    /// * `Err(ScrapeError::LoadMoreNotSettled)` - The load-more control never hid
    /// * `Err(ScrapeError::Product)` - A product card failed to parse
    /// * `Err(ScrapeError)` - Browser errors
    pub async fn render<D>(&self, driver: &mut D, url: &str) -> Result<Vec<Product>>
    where
        D: PageDriver + ?Sized,
    {
        driver.navigate(url).await?;
        let mut state = RenderState::Loaded;
        tracing::debug!("{} -> {}", url, state);

        let mut products = Vec::new();
        while !state.is_terminal() {
            state = self.step(driver, url, state, &mut products).await?;
        }

        tracing::debug!("{}: {} products", url, products.len());
        Ok(products)
    }

    /// Performs the work that leads out of `state` and returns the new state
    ///
    /// Products are stored into `products` on the step into `Extracted`.
    async fn step<D>(
        &self,
        driver: &mut D,
        url: &str,
        state: RenderState,
        products: &mut Vec<Product>,
    ) -> Result<RenderState>
    where
        D: PageDriver + ?Sized,
    {
        let next = match state {
            RenderState::Loaded => {
                if self.dismiss_consent(driver).await? {
                    tracing::debug!("Dismissed cookie consent on {}", url);
                }
                RenderState::ConsentChecked
            }
            RenderState::ConsentChecked => {
                let clicks = self.expand(driver, url).await?;
                tracing::debug!("{}: {} load-more clicks", url, clicks);
                RenderState::Expanded
            }
            RenderState::Expanded => {
                let html = driver.content().await?;
                *products = parse_products(&html, url, &self.products)?;
                RenderState::Extracted
            }
            RenderState::Extracted => state,
        };

        let state = state.transition(next)?;
        tracing::debug!("{} -> {}", url, state);
        Ok(state)
    }

    /// Clicks the consent control once if the page has one
    async fn dismiss_consent<D>(&self, driver: &mut D) -> Result<bool>
    where
        D: PageDriver + ?Sized,
    {
        if !driver.exists(&self.consent_selector).await? {
            return Ok(false);
        }

        driver.click(&self.consent_selector).await?;
        Ok(true)
    }

    /// Clicks "load more" while it stays visible
    ///
    /// Waits the poll interval after each click. Gives up with
    /// `LoadMoreNotSettled` once the click budget is spent and the control is
    /// still visible.
    ///
    /// # Returns
    ///
    /// The number of clicks performed (0 when the page has no control)
    pub async fn expand<D>(&self, driver: &mut D, url: &str) -> Result<u32>
    where
        D: PageDriver + ?Sized,
    {
        if !driver.exists(&self.load_more_selector).await? {
            return Ok(0);
        }

        let mut clicks = 0;
        while driver.is_visible(&self.load_more_selector).await? {
            if clicks >= self.max_load_more_clicks {
                return Err(ScrapeError::LoadMoreNotSettled {
                    url: url.to_string(),
                    clicks,
                });
            }

            driver.click(&self.load_more_selector).await?;
            clicks += 1;
            tracing::trace!("Load-more click {} on {}", clicks, url);

            tokio::time::sleep(self.poll_interval).await;
        }

        Ok(clicks)
    }
}
