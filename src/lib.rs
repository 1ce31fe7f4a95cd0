//! Scrape paginated Plaza Vea category listings.
//!
//! `Crawler` walks the pages of a listing through a [`PageSource`]
//! (headless Chrome over WebDriver, or plain HTTP), `ListingPage` reads the
//! product cards of each rendered page into `ProductRecord`s, and
//! `write_records` saves them as `;`-separated text.
//!
//! Feature Flags:
//! - `serde`: Enables serde support for the structs. (default)

mod browser;
mod config;
mod crawl;
mod export;
mod listing;
mod record;

pub use browser::{ChromeDriverProcess, ChromeOptions, HttpSource, PageSource, WebDriverSource};
pub use config::{ScrapeConfig, DEFAULT_BASE_URL};
pub use crawl::Crawler;
pub use export::{
    default_output_path, resolve_output_path, write_records, write_to, DEFAULT_FILE_NAME,
};
use header::{HeaderMap, HeaderValue};
pub use listing::{page_url, ListingPage, ListingSelectors};
pub use record::{clean_price, safe_attr, safe_text, stock_label, ProductRecord};
use reqwest::header;
pub use url::Url;

/// Builds the default headers for the HTTP client.
fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("es-PE,es;q=0.9,en;q=0.5"),
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers
}
