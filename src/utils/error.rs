use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("URL template '{template}' has no {{page}} placeholder")]
    UrlTemplate { template: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Any of these ends pagination for the current run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("page {page} returned HTTP {status}")]
    Status { page: u32, status: u16 },

    #[error("request for page {page} failed: {source}")]
    Transport {
        page: u32,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Error, Debug)]
#[error("cannot parse price from '{raw}': {source}")]
pub struct PriceParseError {
    pub raw: String,
    #[source]
    pub source: rust_decimal::Error,
}

/// Reasons a single catalogue entry is skipped.
#[derive(Error, Debug)]
pub enum EntryError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid detail link '{href}': {source}")]
    Link {
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Price(#[from] PriceParseError),
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("cannot build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP failure: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
