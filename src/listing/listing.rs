use eyre::{eyre, Result};
use scraper::{Html, Selector};
use url::Url;

use crate::listing::ListingSelectors;
use crate::record::{clean_price, first_attr, safe_attr, safe_text, stock_label, ProductRecord};

#[derive(Debug, Clone)]
/// Products read from one rendered page of a category listing.
///
/// Use `ListingPage::parse` on the HTML handed back by a
/// [`PageSource`](crate::PageSource).
pub struct ListingPage {
    /// URL the page was loaded from, used to resolve relative links.
    pub url: Url,
    /// Products in document order.
    pub records: Vec<ProductRecord>,
    /// Whether each card has a photo element at all, parallel to `records`.
    has_photo: Vec<bool>,
}

impl ListingPage {
    /// Parses the product cards out of a rendered listing page.
    ///
    /// Only an invalid item selector is an error. A card with a missing
    /// price, link or photo still yields a record with empty fields.
    ///
    /// ```rust
    /// use plazavea_scraper::{ListingPage, ListingSelectors, Url};
    ///
    /// let html = r#"<div class="HA Showcase Showcase--non-food ga-product-item"
    ///     data-ga-name="TV 50" data-sku="42" data-stock="true"></div>"#;
    /// let url = Url::parse("https://www.plazavea.com.pe/tecnologia/televisores?page=1").unwrap();
    /// let page = ListingPage::parse(html, &url, &ListingSelectors::default()).unwrap();
    /// assert_eq!(page.records[0].name, "TV 50");
    /// assert_eq!(page.records[0].in_stock, "Yes");
    /// ```
    pub fn parse(html: &str, url: &Url, selectors: &ListingSelectors) -> Result<Self> {
        let item_selector = Selector::parse(&selectors.item)
            .map_err(|e| eyre!("Invalid item selector `{}`: {}", selectors.item, e))?;
        let link_selector = Selector::parse(&selectors.link).ok();
        let image_selector = Selector::parse(&selectors.image).ok();

        let document = Html::parse_document(html);
        let (records, has_photo): (Vec<ProductRecord>, Vec<bool>) = document
            .select(&item_selector)
            .map(|item| {
                let link = link_selector
                    .as_ref()
                    .and_then(|sel| item.select(sel).next())
                    .and_then(|anchor| anchor.value().attr("href"))
                    .map(|href| resolve_url(url, href))
                    .unwrap_or_default();

                let photo = image_selector
                    .as_ref()
                    .and_then(|sel| item.select(sel).next());
                let image_url = photo
                    .map(|img| resolve_url(url, &first_attr(img, &selectors.image_attrs)))
                    .unwrap_or_default();

                let record = ProductRecord {
                    name: safe_attr(item, "data-ga-name"),
                    brand: safe_attr(item, "data-ga-brand"),
                    current_price: clean_price(&safe_text(item, &selectors.current_price)),
                    old_price: clean_price(&safe_text(item, &selectors.old_price)),
                    special_price: clean_price(&safe_text(item, &selectors.special_price)),
                    sku: safe_attr(item, "data-sku"),
                    category: safe_attr(item, "data-ga-category"),
                    link,
                    in_stock: stock_label(item.value().attr("data-stock")).into(),
                    image_url,
                };
                (record, photo.is_some())
            })
            .unzip();

        Ok(ListingPage {
            url: url.clone(),
            records,
            has_photo,
        })
    }

    /// Indices of the records whose photo element carries no URL yet.
    ///
    /// Cards without a photo element are left out; scrolling them into view
    /// cannot produce one.
    pub fn missing_images(&self) -> Vec<usize> {
        self.records
            .iter()
            .zip(&self.has_photo)
            .enumerate()
            .filter(|(_, (record, has_photo))| **has_photo && record.image_url.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Fills still-empty image URLs from a later read of the same page.
    ///
    /// Records are matched by position; the SKU must agree when both sides
    /// carry one, so a reshuffled page does not attach the wrong photo.
    pub fn fill_images(&mut self, reread: &ListingPage) {
        for (record, fresh) in self.records.iter_mut().zip(&reread.records) {
            if !record.image_url.is_empty() || fresh.image_url.is_empty() {
                continue;
            }
            if !record.sku.is_empty() && !fresh.sku.is_empty() && record.sku != fresh.sku {
                continue;
            }
            record.image_url = fresh.image_url.clone();
        }
    }
}

/// URL of page `page` of the listing at `base`.
///
/// Any existing `page` parameter is replaced; other parameters are kept.
pub fn page_url(base: &Url, page: u32) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("page", &page.to_string());
    url
}

fn resolve_url(page: &Url, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    page.join(href)
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}
