use eyre::{Result, WrapErr};
use serde_json::json;
use thirtyfour::prelude::*;
use tracing::debug;
use url::Url;

use super::PageSource;

const SCROLL_BY: &str = "window.scrollBy(0, arguments[0]);";
const REVEAL: &str = "const el = document.querySelectorAll(arguments[0])[arguments[1]];\
                      if (el) { el.scrollIntoView({block: 'center'}); }";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How the Chrome session is started.
pub struct ChromeOptions {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

/// Chrome driven over the WebDriver protocol.
pub struct WebDriverSource {
    driver: WebDriver,
}

impl WebDriverSource {
    /// Opens a Chrome session on the WebDriver server at `server_url`.
    pub async fn connect(server_url: &str, options: ChromeOptions) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if options.headless {
            caps.set_headless()?;
        }
        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;
        caps.add_chrome_arg(&format!(
            "--window-size={},{}",
            options.window_width, options.window_height
        ))?;

        let driver = WebDriver::new(server_url, caps)
            .await
            .wrap_err_with(|| format!("Failed to open a Chrome session on {server_url}"))?;
        Ok(Self { driver })
    }
}

impl PageSource for WebDriverSource {
    async fn goto(&mut self, url: &Url) -> Result<()> {
        self.driver
            .goto(url.as_str())
            .await
            .wrap_err_with(|| format!("Failed to load {url}"))
    }

    async fn scroll_by(&mut self, pixels: i64) -> Result<()> {
        self.driver.execute(SCROLL_BY, vec![json!(pixels)]).await?;
        Ok(())
    }

    async fn reveal(&mut self, selector: &str, index: usize) -> Result<()> {
        debug!(selector, index, "scrolling item into view");
        self.driver
            .execute(REVEAL, vec![json!(selector), json!(index)])
            .await?;
        Ok(())
    }

    async fn html(&mut self) -> Result<String> {
        Ok(self.driver.source().await?)
    }

    async fn close(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}
