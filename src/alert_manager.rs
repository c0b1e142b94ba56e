use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::time::Instant;

use crate::config::PipelineConfig;
use crate::models::Listing;
use crate::parser::ListingParser;
use crate::plugins::notifiers::email::{EmailConfig, EmailNotifier};
use crate::plugins::trackers::price::below_threshold;
use crate::plugins::traits::{AlertMessage, Notifier};
use crate::scheduler::PeriodicTask;
use crate::scraper::{CatalogueFetcher, HttpCatalogueFetcher};
use crate::utils::error::Result;

/// Outcome of one alert run.
#[derive(Debug, Clone, Serialize)]
pub struct PriceCheckResult {
    pub pages_fetched: u32,
    pub listings_found: usize,
    pub matches: usize,
    pub alert_sent: bool,
    pub error: Option<String>,
    pub total_time_ms: u64,
}

/// Runs fetch → parse → filter → notify for one catalogue.
pub struct AlertManager {
    fetcher: Box<dyn CatalogueFetcher>,
    parser: ListingParser,
    notifier: Box<dyn Notifier>,
    threshold: Decimal,
    currency_symbol: String,
}

impl AlertManager {
    pub fn new(
        fetcher: Box<dyn CatalogueFetcher>,
        parser: ListingParser,
        notifier: Box<dyn Notifier>,
        threshold: Decimal,
        currency_symbol: String,
    ) -> Self {
        Self {
            fetcher,
            parser,
            notifier,
            threshold,
            currency_symbol,
        }
    }

    /// Production wiring: HTTP fetcher and SMTP notifier.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let fetcher = HttpCatalogueFetcher::new(config.catalogue.clone())?;
        let parser = ListingParser::new(&config.catalogue)?;
        let notifier = EmailNotifier::new(EmailConfig::from_pipeline(config));

        Ok(Self::new(
            Box::new(fetcher),
            parser,
            Box::new(notifier),
            config.price_threshold,
            config.catalogue.currency_symbol.clone(),
        ))
    }

    /// Walks pages 1, 2, 3… until a fetch fails or a page has no product
    /// entries at all. A page whose entries were all skipped does not stop
    /// the walk. Returns the listings and the number of pages walked.
    pub async fn collect_all_listings(&self) -> (Vec<Listing>, u32) {
        let mut listings = Vec::new();
        let mut page = 1;

        loop {
            let fetched = match self.fetcher.fetch_page(page).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    tracing::info!("Stopping at page {}: {}", page, e);
                    break;
                }
            };

            let parsed = self.parser.parse(&fetched.body);
            if parsed.entries == 0 {
                tracing::info!("Stopping at page {}: no listings", page);
                break;
            }

            tracing::debug!(
                "Page {} yielded {} of {} listings",
                page,
                parsed.listings.len(),
                parsed.entries
            );
            listings.extend(parsed.listings);
            page += 1;
        }

        (listings, page - 1)
    }

    /// One full alert run. Delivery failures are logged and reported in the
    /// result, never returned as an error.
    pub async fn check_prices(&self) -> PriceCheckResult {
        let start_time = Instant::now();
        tracing::info!("Checking catalogue prices");

        let (listings, pages_fetched) = self.collect_all_listings().await;
        let cheap = below_threshold(&listings, self.threshold);

        let mut alert_sent = false;
        let mut error = None;

        if cheap.is_empty() {
            tracing::info!("No listings found below {}{}", self.currency_symbol, self.threshold);
        } else {
            tracing::info!(
                "Found {} listings below {}{}",
                cheap.len(),
                self.currency_symbol,
                self.threshold
            );

            let message = AlertMessage::compose(&cheap, self.threshold, &self.currency_symbol);
            match self.notifier.notify(&message).await {
                Ok(()) => {
                    tracing::info!("Alert sent: {}", message.subject);
                    alert_sent = true;
                }
                Err(e) => {
                    tracing::error!("Failed to send alert: {}", e);
                    error = Some(e.to_string());
                }
            }
        }

        PriceCheckResult {
            pages_fetched,
            listings_found: listings.len(),
            matches: cheap.len(),
            alert_sent,
            error,
            total_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}

#[async_trait]
impl PeriodicTask for AlertManager {
    fn name(&self) -> &str {
        "price-check"
    }

    async fn run(&self) -> anyhow::Result<()> {
        let result = self.check_prices().await;
        tracing::info!(
            "Price check finished: {} pages, {} listings, {} matches, alert sent: {} ({} ms)",
            result.pages_fetched,
            result.listings_found,
            result.matches,
            result.alert_sent,
            result.total_time_ms
        );
        Ok(())
    }
}
