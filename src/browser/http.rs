use eyre::{Result, WrapErr};
use reqwest::Client;
use url::Url;

use super::PageSource;

/// Plain HTTP fetches with browser-like headers.
///
/// Nothing is executed, so scrolling does nothing and lazily loaded images
/// stay missing. Useful when the listing is rendered server-side.
pub struct HttpSource {
    client: Client,
    body: String,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .default_headers(crate::build_headers())
            .build()?;
        Ok(Self {
            client,
            body: String::new(),
        })
    }
}

impl PageSource for HttpSource {
    async fn goto(&mut self, url: &Url) -> Result<()> {
        let webpage = self
            .client
            .get(url.to_owned())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .wrap_err_with(|| format!("Failed to load {url}"))?;
        self.body = webpage.text().await?;
        Ok(())
    }

    async fn scroll_by(&mut self, _pixels: i64) -> Result<()> {
        Ok(())
    }

    async fn reveal(&mut self, _selector: &str, _index: usize) -> Result<()> {
        Ok(())
    }

    async fn html(&mut self) -> Result<String> {
        Ok(self.body.clone())
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}
