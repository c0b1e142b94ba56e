use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::CatalogueConfig;
use crate::models::Listing;
use crate::plugins::trackers::price::parse_price;
use crate::utils::error::{AppError, EntryError, Result};

/// What one catalogue page contained.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub listings: Vec<Listing>,
    /// Product nodes matched, including those that were skipped.
    pub entries: usize,
}

/// Extracts listings from one catalogue page.
pub struct ListingParser {
    base_url: Url,
    product: Selector,
    link: Selector,
    price: Selector,
}

impl ListingParser {
    pub fn new(catalogue: &CatalogueConfig) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(&catalogue.base_url)?,
            product: compile(&catalogue.selectors.product)?,
            link: compile(&catalogue.selectors.link)?,
            price: compile(&catalogue.selectors.price)?,
        })
    }

    /// Listings in document order. Entries that cannot be read are skipped
    /// but still counted in `entries`.
    pub fn parse(&self, raw_html: &[u8]) -> ParsedPage {
        let html = String::from_utf8_lossy(raw_html);
        let document = Html::parse_document(&html);

        let mut listings = Vec::new();
        let mut entries = 0;
        for (index, entry) in document.select(&self.product).enumerate() {
            entries += 1;
            match self.parse_entry(entry) {
                Ok(listing) => listings.push(listing),
                Err(EntryError::Price(e)) => {
                    tracing::debug!("Skipping entry {} with unparseable price: {}", index + 1, e);
                }
                Err(e) => {
                    tracing::debug!("Skipping malformed entry {}: {}", index + 1, e);
                }
            }
        }

        ParsedPage { listings, entries }
    }

    fn parse_entry(&self, entry: ElementRef<'_>) -> std::result::Result<Listing, EntryError> {
        let link = entry
            .select(&self.link)
            .next()
            .ok_or(EntryError::MissingField("link"))?;
        let title = link
            .value()
            .attr("title")
            .ok_or(EntryError::MissingField("title"))?;
        let href = link
            .value()
            .attr("href")
            .ok_or(EntryError::MissingField("href"))?;

        let price_text: String = entry
            .select(&self.price)
            .next()
            .ok_or(EntryError::MissingField("price"))?
            .text()
            .collect();
        let price = parse_price(price_text.trim())?;

        let detail_url = self.base_url.join(href).map_err(|source| EntryError::Link {
            href: href.to_string(),
            source,
        })?;

        Ok(Listing::new(title, price, detail_url))
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}
