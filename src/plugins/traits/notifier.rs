use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::Listing;
use crate::utils::error::DeliveryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    /// Summarises `listings` in the order given.
    pub fn compose(listings: &[Listing], threshold: Decimal, currency_symbol: &str) -> Self {
        let subject = format!(
            "{} listings below {}{}",
            listings.len(),
            currency_symbol,
            threshold
        );

        let mut body = String::from("The following listings are below your price threshold:\n\n");
        for listing in listings {
            body.push_str(&format!(
                "{} - {}{}\n{}\n\n",
                listing.title(),
                currency_symbol,
                listing.price(),
                listing.detail_url()
            ));
        }

        Self { subject, body }
    }
}

/// Delivery channel for alerts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &AlertMessage) -> Result<(), DeliveryError>;
}
