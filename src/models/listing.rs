use rust_decimal::Decimal;
use url::Url;

/// One product entry scraped from a catalogue page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    title: String,
    price: Decimal,
    detail_url: Url,
}

impl Listing {
    pub fn new(title: impl Into<String>, price: Decimal, detail_url: Url) -> Self {
        Self {
            title: title.into(),
            price,
            detail_url,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn detail_url(&self) -> &Url {
        &self.detail_url
    }
}
