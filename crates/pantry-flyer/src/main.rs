use anyhow::{Context, Result};
use clap::Parser;
use pantry_flyer::config::{FlyerCli, FlyerCommand};
use pantry_flyer::scrape::FlyerScraper;
use pantry_flyer::{ocr, preflight, segment};
use pantry_store::{open_store, GroceriesFile, StoreConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match FlyerCli::parse().command {
        FlyerCommand::Ocr {
            image,
            store,
            lang,
            data_dir,
        } => {
            preflight::check_tesseract()?;
            let text = ocr::recognize(&image, &lang)
                .await
                .with_context(|| format!("ocr {}", image.display()))?;
            let items = segment::extract_items(&text);
            if items.is_empty() {
                warn!("no priced items found in {}", image.display());
            }
            println!("{}", serde_json::to_string_pretty(&items)?);

            if let Some(store_name) = store {
                let store = open_store(&StoreConfig { data_dir }).context("open data dir")?;
                let groceries = GroceriesFile::new(store);
                let count = items.len();
                groceries
                    .merge(&store_name, items)
                    .await
                    .context("save groceries")?;
                info!("saved {count} items for {store_name}");
            }
        }
        FlyerCommand::Scrape {
            store,
            region,
            out,
            site,
            link_alt,
        } => {
            let scraper = FlyerScraper::new(&site)?.with_link_alt(&link_alt);
            let saved = scraper.run(&store, &region, &out).await?;
            for path in saved {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}
