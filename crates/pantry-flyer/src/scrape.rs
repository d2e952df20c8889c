//! Downloads the page images of a store's weekly flyer.
//!
//! The flyer site is navigated with plain GET requests: landing page, then
//! the link wrapping the "flyer in images" banner, then the page index link,
//! whose second table holds one `<img>` per flyer page.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

pub const FLYER_SITE: &str = "https://www.circulaires.com";
pub const DEFAULT_LINK_ALT: &str = "Circulaire IGA en images";

static IMG_WITH_ALT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[alt]").expect("valid selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));
static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));
static IMG_WITH_SRC: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("valid selector"));

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("flyer link not found on {0}")]
    FlyerLinkNotFound(String),

    #[error("flyer page link not found on {0}")]
    PageLinkNotFound(String),

    #[error("no flyer images found on {0}")]
    NoImages(String),

    #[error("no file name in {0}")]
    NoFileName(String),

    #[error("{url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct FlyerScraper {
    client: reqwest::Client,
    site: Url,
    link_alt: String,
}

impl FlyerScraper {
    pub fn new(site: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: reqwest::Client::new(),
            site: Url::parse(site)?,
            link_alt: DEFAULT_LINK_ALT.to_string(),
        })
    }

    /// Alt text of the banner image whose link opens the flyer.
    pub fn with_link_alt(mut self, alt: &str) -> Self {
        self.link_alt = alt.to_string();
        self
    }

    /// Walk to the flyer pages for `store` in `region` and save every page
    /// image under `out_dir/store/`. Images that fail to download are
    /// logged and skipped. Returns the paths written.
    pub async fn run(
        &self,
        store: &str,
        region: &str,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, ScrapeError> {
        let mut landing = self.site.join(&format!("{store}/"))?;
        landing.query_pairs_mut().append_pair("region", region);

        info!("opening {landing}");
        let html = self.fetch_page(&landing).await?;
        let href = find_flyer_link(&html, &self.link_alt)
            .ok_or_else(|| ScrapeError::FlyerLinkNotFound(landing.to_string()))?;

        let flyer = landing.join(&href)?;
        debug!("flyer: {flyer}");
        let html = self.fetch_page(&flyer).await?;
        let href = find_page_link(&html, region)
            .ok_or_else(|| ScrapeError::PageLinkNotFound(flyer.to_string()))?;

        let pages = flyer.join(&href)?;
        debug!("pages: {pages}");
        let html = self.fetch_page(&pages).await?;
        let sources = flyer_image_sources(&html);
        if sources.is_empty() {
            return Err(ScrapeError::NoImages(pages.to_string()));
        }

        let folder = out_dir.join(store);
        tokio::fs::create_dir_all(&folder).await?;

        let skip = format!("/flyer/{store}/");
        let mut saved = Vec::new();
        for src in sources {
            let url = match pages.join(&src) {
                Ok(url) => url,
                Err(e) => {
                    warn!("skipping image {src}: {e}");
                    continue;
                }
            };
            if url.as_str().contains(&skip) {
                debug!("skipping site asset {url}");
                continue;
            }
            let url = clean_image_url(url);
            match self.download(&url, &folder).await {
                Ok(path) => {
                    info!("image downloaded: {}", path.display());
                    saved.push(path);
                }
                Err(e) => warn!("failed to download {url}: {e}"),
            }
        }

        info!("scraping completed: {} images in {}", saved.len(), folder.display());
        Ok(saved)
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, ScrapeError> {
        let resp = self.client.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.text().await?)
    }

    async fn download(&self, url: &Url, folder: &Path) -> Result<PathBuf, ScrapeError> {
        let name = file_name(url).ok_or_else(|| ScrapeError::NoFileName(url.to_string()))?;
        let resp = self.client.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }
        let bytes = resp.bytes().await?;
        let path = folder.join(name);
        tokio::fs::write(&path, &bytes).await?;
        Ok(path)
    }
}

/// `href` of the nearest anchor around an image with the given alt text.
pub fn find_flyer_link(html: &str, alt: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&IMG_WITH_ALT)
        .filter(|img| img.value().attr("alt") == Some(alt))
        .find_map(|img| {
            img.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "a")
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string)
        })
}

/// The relative link to the flyer's page index for `region`.
pub fn find_page_link(html: &str, region: &str) -> Option<String> {
    let target = format!("../page.do?region={region}");
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| *href == target)
        .map(str::to_string)
}

/// Image sources inside the second table of the page index.
pub fn flyer_image_sources(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Some(table) = document.select(&TABLE).nth(1) else {
        return Vec::new();
    };
    table
        .select(&IMG_WITH_SRC)
        .filter_map(|img| img.value().attr("src"))
        .map(str::to_string)
        .collect()
}

pub fn clean_image_url(mut url: Url) -> Url {
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Last path segment, if it is not empty.
pub fn file_name(url: &Url) -> Option<String> {
    url.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
