//! Headless browser session
//!
//! Launches Chrome/Chromium over the DevTools protocol (`chromiumoxide`) and
//! exposes a single page through [`crate::render::PageDriver`].

mod executable;
mod session;

pub use executable::find_browser_executable;
pub use session::BrowserSession;
