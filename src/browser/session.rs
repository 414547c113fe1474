use crate::browser::find_browser_executable;
use crate::config::BrowserConfig;
use crate::render::{PageDriver, ScrapeDriver};
use crate::{Result, ScrapeError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

/// A launched browser with the one page every category is rendered in
///
/// Call [`ScrapeDriver::close`] when done. If the session is dropped
/// without closing, chromiumoxide kills the browser process.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launches the browser and opens a blank page
    ///
    /// # Returns
    ///
    /// * `Ok(BrowserSession)` - Browser running with one page open
    /// * `Err(ScrapeError::BrowserSetup)` - No executable found or invalid launch config
    /// * `Err(ScrapeError::Browser)` - The browser failed to start
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let executable = find_browser_executable(config.executable.as_deref())?;

        let mut builder = CdpConfig::builder()
            .chrome_executable(executable)
            .request_timeout(Duration::from_secs(config.request_timeout_secs))
            .window_size(1920, 1080)
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-notifications")
            .arg("--mute-audio");

        if !config.headless {
            builder = builder.with_head();
        }

        for arg in &config.extra_args {
            builder = builder.arg(arg.as_str());
        }

        let cdp_config = builder.build().map_err(ScrapeError::BrowserSetup)?;

        info!("Launching browser (headless: {})", config.headless);
        let (browser, mut handler) = Browser::launch(cdp_config).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    let message = e.to_string();
                    // chromiumoxide does not know every CDP event Chrome emits
                    if message.contains("data did not match any variant of untagged enum Message")
                    {
                        trace!("Ignored unknown CDP message: {}", message);
                    } else {
                        error!("Browser handler error: {:?}", e);
                    }
                }
            }
            debug!("Browser handler task completed");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(e.into());
            }
        };

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    async fn shutdown_browser(&mut self) -> Result<()> {
        self.browser.close().await?;
        self.browser.wait().await?;
        Ok(())
    }
}

/// Waits for the CDP handler task, aborting it first if the browser did not
/// shut down cleanly
async fn finish_handler(handler_task: JoinHandle<()>, abort: bool) {
    if abort {
        handler_task.abort();
    }

    if let Err(e) = handler_task.await {
        debug!("Browser handler task ended abnormally: {}", e);
    }
}

async fn evaluate_bool(page: &Page, script: String) -> Result<bool> {
    page.evaluate(script)
        .await?
        .into_value::<bool>()
        .map_err(|e| ScrapeError::Script(e.to_string()))
}

#[async_trait]
impl PageDriver for BrowserSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    async fn exists(&mut self, selector: &str) -> Result<bool> {
        Ok(!self.page.find_elements(selector).await?.is_empty())
    }

    async fn is_visible(&mut self, selector: &str) -> Result<bool> {
        evaluate_bool(&self.page, visibility_script(selector)?).await
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        self.page.find_element(selector).await?.click().await?;
        Ok(())
    }

    async fn content(&mut self) -> Result<String> {
        Ok(self.page.content().await?)
    }
}

#[async_trait]
impl ScrapeDriver for BrowserSession {
    /// Closes the browser and waits for the process and handler to finish
    async fn close(mut self) -> Result<()> {
        info!("Closing browser");
        let closed = self.shutdown_browser().await;
        finish_handler(self.handler_task, closed.is_err()).await;
        closed
    }
}

/// Script that reports whether the first element matching `selector` is rendered
fn visibility_script(selector: &str) -> Result<String> {
    let selector = serde_json::to_string(selector).map_err(|e| ScrapeError::Script(e.to_string()))?;

    Ok(format!(
        r#"(() => {{
            const el = document.querySelector({selector});
            if (!el) return false;
            const style = window.getComputedStyle(el);
            return style.display !== 'none'
                && style.visibility !== 'hidden'
                && el.getClientRects().length > 0;
        }})()"#
    ))
}
