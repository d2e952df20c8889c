use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::scrape::{DEFAULT_LINK_ALT, FLYER_SITE};

#[derive(Debug, Parser)]
#[command(name = "pantry-flyer", about = "Grocery flyer OCR and scraping tools")]
pub struct FlyerCli {
    #[command(subcommand)]
    pub command: FlyerCommand,
}

#[derive(Debug, Subcommand)]
pub enum FlyerCommand {
    /// Read prices off a flyer image and print them as JSON
    Ocr {
        /// Flyer image (PNG, JPEG, GIF or WebP)
        image: PathBuf,

        /// Store name; when set, the items are saved to the groceries file
        #[arg(long)]
        store: Option<String>,

        /// Tesseract language
        #[arg(long, default_value = "eng")]
        lang: String,

        /// Data directory holding groceries.json
        #[arg(long, env = "PANTRY_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Download the page images of a store's current flyer
    Scrape {
        #[arg(long, default_value = "supermarche-iga")]
        store: String,

        #[arg(long, default_value = "Monteregie")]
        region: String,

        /// Output directory; images land in <out>/<store>/
        #[arg(long, default_value = "flyer")]
        out: PathBuf,

        /// Flyer site root
        #[arg(long, env = "PANTRY_FLYER_SITE", default_value = FLYER_SITE)]
        site: String,

        /// Alt text of the banner linking to the flyer
        #[arg(long, default_value = DEFAULT_LINK_ALT)]
        link_alt: String,
    },
}
