//! Page rendering for category pages
//!
//! Category pages load their products client-side, so they are driven
//! through a browser until pagination is exhausted before the HTML is parsed.
//!
//! # Components
//!
//! - `PageDriver`: the browser operations rendering needs
//! - `ScrapeDriver`: a page driver that owns a browser to release
//! - `RenderState`: readiness states a page moves through
//! - `Renderer`: consent, load-more expansion and extraction

mod page;
mod state;

pub use page::Renderer;
pub use state::RenderState;

use crate::Result;
use async_trait::async_trait;

/// Browser operations used while rendering a category page
///
/// Selectors are CSS selectors. The driver is exclusively borrowed for the
/// duration of a render; one page is driven at a time.
#[async_trait]
pub trait PageDriver: Send {
    /// Navigates to the URL and waits for the load to finish
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Returns true if at least one element matches the selector
    async fn exists(&mut self, selector: &str) -> Result<bool>;

    /// Returns true if the first matching element is displayed
    async fn is_visible(&mut self, selector: &str) -> Result<bool>;

    /// Clicks the first matching element
    async fn click(&mut self, selector: &str) -> Result<()>;

    /// Returns the current DOM serialized as HTML
    async fn content(&mut self) -> Result<String>;
}

/// A page driver backed by a browser that must be released after the run
#[async_trait]
pub trait ScrapeDriver: PageDriver + Sized {
    /// Shuts the browser down
    async fn close(self) -> Result<()>;
}
