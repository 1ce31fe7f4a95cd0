use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use eyre::Result;
use plazavea_scraper::{
    resolve_output_path, write_records, ChromeDriverProcess, ChromeOptions, Crawler, HttpSource,
    ProductRecord, ScrapeConfig, Url, WebDriverSource, DEFAULT_BASE_URL, DEFAULT_FILE_NAME,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "plazavea-scraper", version, about)]
/// Scrape a paginated product listing into a `;`-separated file.
struct Cli {
    /// Listing URL; `?page=N` is added per page.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    url: Url,

    #[arg(long, default_value_t = 1)]
    first_page: u32,

    /// Last page to scrape, inclusive.
    #[arg(long, default_value_t = 50)]
    last_page: u32,

    /// Where to save the file. Asked interactively when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// How pages are loaded.
    #[arg(long, value_enum, default_value_t = Backend::Webdriver)]
    backend: Backend,

    /// Running WebDriver server to connect to.
    #[arg(long, default_value = "http://localhost:9515")]
    webdriver_url: String,

    /// Start this chromedriver executable instead of using `--webdriver-url`.
    #[arg(long)]
    chromedriver: Option<PathBuf>,

    /// Show the browser window.
    #[arg(long)]
    headed: bool,

    /// Seconds to wait after loading each page.
    #[arg(long, default_value_t = 3.0)]
    page_wait: f64,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Backend {
    /// Headless Chrome over WebDriver.
    Webdriver,
    /// Plain HTTP requests, no JavaScript.
    Http,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ScrapeConfig {
        base_url: cli.url.clone(),
        first_page: cli.first_page,
        last_page: cli.last_page,
        page_wait: Duration::try_from_secs_f64(cli.page_wait)?,
        ..Default::default()
    };
    config.validate()?;

    let records = match cli.backend {
        Backend::Webdriver => {
            let options = ChromeOptions {
                headless: !cli.headed,
                ..Default::default()
            };
            // kept alive until the crawl is over
            let chromedriver = match &cli.chromedriver {
                Some(path) => Some(ChromeDriverProcess::spawn(path).await?),
                None => None,
            };
            let server = chromedriver
                .as_ref()
                .map(ChromeDriverProcess::url)
                .unwrap_or_else(|| cli.webdriver_url.clone());
            let source = WebDriverSource::connect(&server, options).await?;
            Crawler::new(source, config).run().await?
        }
        Backend::Http => Crawler::new(HttpSource::new()?, config).run().await?,
    };
    info!(products = records.len(), "scraping finished");

    let path = match cli.output {
        Some(path) => path,
        None => prompt_output_path()?,
    };
    save(&path, &records)?;
    println!("\nData saved to: {}", path.display());
    Ok(())
}

fn prompt_output_path() -> Result<PathBuf> {
    print!("\nFull path to save the file (enter = Desktop/{DEFAULT_FILE_NAME}):\n> ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    resolve_output_path(&answer)
}

fn save(path: &Path, records: &[ProductRecord]) -> Result<()> {
    write_records(path, records)?;
    info!(path = %path.display(), rows = records.len(), "wrote file");
    Ok(())
}
