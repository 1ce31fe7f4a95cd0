use eyre::{Result, WrapErr};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::browser::PageSource;
use crate::config::ScrapeConfig;
use crate::listing::{page_url, ListingPage};
use crate::record::ProductRecord;

/// Walks the listing pages one after another and collects their products.
pub struct Crawler<S> {
    source: S,
    config: ScrapeConfig,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(source: S, config: ScrapeConfig) -> Self {
        Self { source, config }
    }

    /// Scrapes every configured page and closes the source.
    ///
    /// Records come back in page order, then document order. A page that
    /// fails to load stops the run; the source is closed either way.
    pub async fn run(mut self) -> Result<Vec<ProductRecord>> {
        let outcome = self.crawl_pages().await;
        let closed = self.source.close().await;
        let records = outcome?;
        closed.wrap_err("Failed to close the browser session")?;
        Ok(records)
    }

    async fn crawl_pages(&mut self) -> Result<Vec<ProductRecord>> {
        self.config.validate()?;
        let mut records = Vec::new();
        for page in self.config.pages() {
            info!("Processing page {page}...");
            let listing = self.scrape_page(page).await?;
            info!(page, products = listing.records.len(), "page done");
            records.extend(listing.records);
        }
        Ok(records)
    }

    /// Loads one page, scrolls it, and reads its product cards.
    pub async fn scrape_page(&mut self, page: u32) -> Result<ListingPage> {
        let url = page_url(&self.config.base_url, page);
        self.source.goto(&url).await?;
        sleep(self.config.page_wait).await;

        // slow scroll so the photos start loading
        for step in 0..self.config.scroll_steps {
            debug!(step, "scrolling");
            self.source.scroll_by(self.config.scroll_step_px).await?;
            sleep(self.config.scroll_pause).await;
        }

        let html = self.source.html().await?;
        let mut listing = ListingPage::parse(&html, &url, &self.config.selectors)
            .wrap_err_with(|| format!("Failed to read listing {url}"))?;

        let missing = listing.missing_images();
        if missing.is_empty() {
            return Ok(listing);
        }

        let mut revealed = 0;
        for &index in &missing {
            match self.source.reveal(&self.config.selectors.item, index).await {
                Ok(()) => {
                    revealed += 1;
                    sleep(self.config.reveal_pause).await;
                }
                Err(e) => debug!(index, "could not scroll item into view: {e}"),
            }
        }
        if revealed > 0 {
            match self.source.html().await.and_then(|html| {
                ListingPage::parse(&html, &url, &self.config.selectors)
            }) {
                Ok(reread) => listing.fill_images(&reread),
                Err(e) => debug!("could not re-read {url}: {e}"),
            }
        }

        let still_missing = listing.missing_images().len();
        if still_missing > 0 {
            warn!(page, still_missing, "products without an image URL");
        }
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::bail;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::time::Duration;
    use url::Url;

    #[derive(Default)]
    struct Log {
        visited: Vec<String>,
        scrolled: Vec<i64>,
        revealed: Vec<usize>,
        closed: bool,
    }

    /// Serves canned pages; a page switches to its "after reveal" HTML once
    /// any of its cards has been scrolled into view.
    struct FakeSource {
        pages: HashMap<String, (String, String)>,
        current: Option<String>,
        revealed_current: bool,
        log: Rc<RefCell<Log>>,
    }

    impl PageSource for FakeSource {
        async fn goto(&mut self, url: &Url) -> Result<()> {
            self.log.borrow_mut().visited.push(url.to_string());
            if !self.pages.contains_key(url.as_str()) {
                bail!("404 for {url}");
            }
            self.current = Some(url.to_string());
            self.revealed_current = false;
            Ok(())
        }

        async fn scroll_by(&mut self, pixels: i64) -> Result<()> {
            self.log.borrow_mut().scrolled.push(pixels);
            Ok(())
        }

        async fn reveal(&mut self, _selector: &str, index: usize) -> Result<()> {
            self.log.borrow_mut().revealed.push(index);
            self.revealed_current = true;
            Ok(())
        }

        async fn html(&mut self) -> Result<String> {
            let current = self.current.as_ref().expect("goto before html");
            let (before, after) = &self.pages[current];
            let html = if self.revealed_current { after } else { before };
            Ok(html.clone())
        }

        async fn close(self) -> Result<()> {
            self.log.borrow_mut().closed = true;
            Ok(())
        }
    }

    fn card(sku: &str, img: &str) -> String {
        format!(
            r#"<div class="HA Showcase Showcase--non-food ga-product-item" data-sku="{sku}"
                   data-ga-name="TV {sku}" data-stock="true">
                 <div class="Showcase__photo"><img src="{img}"></div>
                 <div class="Showcase__salePrice"><span class="price">S/ 1.000,50</span></div>
               </div>"#
        )
    }

    fn quick_config(last_page: u32) -> ScrapeConfig {
        ScrapeConfig {
            base_url: Url::parse("https://shop.test/tv").unwrap(),
            last_page,
            page_wait: Duration::ZERO,
            scroll_pause: Duration::ZERO,
            reveal_pause: Duration::ZERO,
            ..Default::default()
        }
    }

    fn fake(pages: Vec<(&str, String, String)>) -> (FakeSource, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let source = FakeSource {
            pages: pages
                .into_iter()
                .map(|(url, before, after)| (url.to_string(), (before, after)))
                .collect(),
            current: None,
            revealed_current: false,
            log: log.clone(),
        };
        (source, log)
    }

    #[tokio::test]
    async fn collects_pages_in_order() {
        let page1 = card("1", "https://img/1.jpg") + &*card("2", "https://img/2.jpg");
        let page2 = card("3", "https://img/3.jpg");
        let (source, log) = fake(vec![
            ("https://shop.test/tv?page=1", page1.clone(), page1),
            ("https://shop.test/tv?page=2", page2.clone(), page2),
        ]);

        let records = Crawler::new(source, quick_config(2)).run().await.unwrap();

        let skus: Vec<_> = records.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, ["1", "2", "3"]);
        assert_eq!(records[0].current_price, "1000.50");

        let log = log.borrow();
        assert_eq!(
            log.visited,
            ["https://shop.test/tv?page=1", "https://shop.test/tv?page=2"]
        );
        assert_eq!(log.scrolled, vec![400; 20]);
        assert!(log.revealed.is_empty());
        assert!(log.closed);
    }

    #[tokio::test]
    async fn reveals_cards_without_photo_and_rereads() {
        let before = card("1", "https://img/1.jpg") + &*card("2", "");
        let after = card("1", "https://img/1.jpg") + &*card("2", "https://img/2.jpg");
        let (source, log) = fake(vec![("https://shop.test/tv?page=1", before, after)]);

        let records = Crawler::new(source, quick_config(1)).run().await.unwrap();

        assert_eq!(records[1].image_url, "https://img/2.jpg");
        assert_eq!(log.borrow().revealed, vec![1]);
    }

    #[tokio::test]
    async fn photo_that_never_loads_stays_empty() {
        let page = card("1", "");
        let (source, _log) = fake(vec![("https://shop.test/tv?page=1", page.clone(), page)]);

        let records = Crawler::new(source, quick_config(1)).run().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].image_url, "");
    }

    #[tokio::test]
    async fn cards_without_photo_are_not_revealed() {
        let page = card("1", "https://img/1.jpg")
            + r#"<div class="HA Showcase Showcase--non-food ga-product-item" data-sku="2"></div>"#;
        let (source, log) = fake(vec![("https://shop.test/tv?page=1", page.clone(), page)]);

        let records = Crawler::new(source, quick_config(1)).run().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].image_url, "");
        assert!(log.borrow().revealed.is_empty());
    }

    #[tokio::test]
    async fn failed_navigation_stops_the_run_and_closes() {
        let page = card("1", "https://img/1.jpg");
        let (source, log) = fake(vec![("https://shop.test/tv?page=1", page.clone(), page)]);

        let result = Crawler::new(source, quick_config(3)).run().await;

        assert!(result.is_err());
        let log = log.borrow();
        assert_eq!(log.visited.len(), 2);
        assert!(log.closed);
    }
}
