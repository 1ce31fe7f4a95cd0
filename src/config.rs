use std::ops::RangeInclusive;
use std::time::Duration;

use eyre::{bail, Result};
use url::Url;

use crate::listing::ListingSelectors;

/// Listing scraped when nothing else is asked for.
pub const DEFAULT_BASE_URL: &str = "https://www.plazavea.com.pe/tecnologia/televisores";

#[derive(Debug, Clone)]
/// Parameters of one scrape run.
///
/// `ScrapeConfig::default()` walks pages 1 to 50 of the Plaza Vea television
/// listing with the waits the site needs to render its cards and photos.
pub struct ScrapeConfig {
    /// Listing URL; the `page` query parameter is set per page.
    pub base_url: Url,
    pub first_page: u32,
    /// Last page, inclusive.
    pub last_page: u32,
    /// Fixed wait after each navigation.
    pub page_wait: Duration,
    /// How many times to scroll down before reading the page.
    pub scroll_steps: u32,
    pub scroll_step_px: i64,
    /// Wait after each scroll step.
    pub scroll_pause: Duration,
    /// Wait after scrolling a card without a photo into view.
    pub reveal_pause: Duration,
    pub selectors: ListingSelectors,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default listing URL is valid"),
            first_page: 1,
            last_page: 50,
            page_wait: Duration::from_secs(3),
            scroll_steps: 10,
            scroll_step_px: 400,
            scroll_pause: Duration::from_millis(500),
            reveal_pause: Duration::from_millis(500),
            selectors: ListingSelectors::default(),
        }
    }
}

impl ScrapeConfig {
    /// Pages to visit, in order.
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first_page..=self.last_page
    }

    /// Rejects page ranges that cannot be walked.
    pub fn validate(&self) -> Result<()> {
        if self.first_page == 0 {
            bail!("Pages are numbered from 1");
        }
        if self.first_page > self.last_page {
            bail!(
                "First page {} is after last page {}",
                self.first_page,
                self.last_page
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_walks_fifty_pages() {
        let config = ScrapeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pages().count(), 50);
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn rejects_bad_ranges() {
        let zero = ScrapeConfig {
            first_page: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let reversed = ScrapeConfig {
            first_page: 5,
            last_page: 4,
            ..Default::default()
        };
        assert!(reversed.validate().is_err());
    }
}
