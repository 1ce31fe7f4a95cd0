//! Where rendered listing pages come from.
//!
//! The crawl loop only needs to load a URL, nudge the page so lazy content
//! renders, and read back the resulting HTML. `PageSource` is that seam.

mod chromedriver;
mod http;
mod webdriver;

use eyre::Result;
use url::Url;

pub use chromedriver::ChromeDriverProcess;
pub use http::HttpSource;
pub use webdriver::{ChromeOptions, WebDriverSource};

/// A browser-like session that can load pages and hand back their HTML.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Navigates to `url`, waiting for the initial response.
    async fn goto(&mut self, url: &Url) -> Result<()>;
    /// Scrolls the viewport down by `pixels`.
    async fn scroll_by(&mut self, pixels: i64) -> Result<()>;
    /// Scrolls the `index`-th element matching `selector` to the middle of the viewport.
    async fn reveal(&mut self, selector: &str, index: usize) -> Result<()>;
    /// The current document as rendered.
    async fn html(&mut self) -> Result<String>;
    /// Ends the session.
    async fn close(self) -> Result<()>;
}
