use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the config file (any format the `config` crate knows).
pub const CONFIG_PATH_ENV: &str = "PRICE_ALERT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config";
const ENV_PREFIX: &str = "PRICE_ALERT";

/// Replaced by the page number in `catalogue.url_template`.
pub const PAGE_PLACEHOLDER: &str = "{page}";

#[derive(Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(alias = "email_sender")]
    pub sender_address: String,
    #[serde(alias = "email_password")]
    pub sender_credential: String,
    #[serde(alias = "email_receiver")]
    pub receiver_address: String,
    #[serde(alias = "smtp_server")]
    pub mail_host: String,
    #[serde(alias = "smtp_port")]
    pub mail_port: u16,
    pub price_threshold: Decimal,
    #[serde(default)]
    pub catalogue: CatalogueConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    /// Page URL with a `{page}` placeholder.
    pub url_template: String,
    /// Relative detail links are resolved against this.
    pub base_url: String,
    pub currency_symbol: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub selectors: SelectorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub product: String,
    pub link: String,
    pub price: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub interval_secs: u64,
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    pub directory: Option<PathBuf>,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            url_template: "http://books.toscrape.com/catalogue/page-{page}.html".to_string(),
            base_url: "http://books.toscrape.com/catalogue/".to_string(),
            currency_symbol: "£".to_string(),
            request_timeout_secs: 30,
            user_agent: format!("PriceAlert/{}", env!("CARGO_PKG_VERSION")),
            selectors: SelectorConfig::default(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product: "article.product_pod".to_string(),
            link: "h3 a".to_string(),
            price: "p.price_color".to_string(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 12 * 60 * 60,
            poll_interval_secs: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "price_alert=info".to_string(),
            directory: None,
        }
    }
}

impl CatalogueConfig {
    pub fn page_url(&self, page: u32) -> String {
        self.url_template.replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl SchedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl PipelineConfig {
    /// Loads from the file named by `PRICE_ALERT_CONFIG` (default `config.*`)
    /// layered under `PRICE_ALERT__*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::build(&path, true),
            Err(_) => Self::build(DEFAULT_CONFIG_PATH, false),
        }
    }

    /// Loads from an explicit file, which must exist.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Self::build(path, true)
    }

    fn build(path: &str, required: bool) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(required))
            // Add environment variables with prefix "PRICE_ALERT__"
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("sender_address", &self.sender_address)
            .field("sender_credential", &"<redacted>")
            .field("receiver_address", &self.receiver_address)
            .field("mail_host", &self.mail_host)
            .field("mail_port", &self.mail_port)
            .field("price_threshold", &self.price_threshold)
            .field("catalogue", &self.catalogue)
            .field("scheduler", &self.scheduler)
            .field("logging", &self.logging)
            .finish()
    }
}
