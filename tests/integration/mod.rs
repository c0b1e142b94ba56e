// Shared fixtures for the integration tests: a wiremock catalogue and a
// notifier that records what it was asked to send.

pub mod config_tests;

use async_trait::async_trait;
use price_alert::config::CatalogueConfig;
use price_alert::parser::ListingParser;
use price_alert::plugins::traits::{AlertMessage, Notifier};
use price_alert::scraper::HttpCatalogueFetcher;
use price_alert::utils::error::DeliveryError;
use price_alert::AlertManager;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<AlertMessage>>>,
    pub fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &AlertMessage) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            let err = "nobody".parse::<lettre::Address>().unwrap_err();
            return Err(DeliveryError::Address(err));
        }
        Ok(())
    }
}

pub fn product_html(title: &str, price_text: &str) -> String {
    let slug = title.to_lowercase().replace(' ', "-");
    format!(
        r#"<li class="col-xs-6"><article class="product_pod">
            <div class="image_container">
                <a href="{slug}_1/index.html"><img src="x.jpg" alt="{title}"></a>
            </div>
            <h3><a href="{slug}_1/index.html" title="{title}">{title}</a></h3>
            <div class="product_price"><p class="price_color">{price_text}</p></div>
        </article></li>"#
    )
}

pub fn catalogue_page(products: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><body><section><ol class=\"row\">{}</ol></section></body></html>",
        products.concat()
    )
}

pub async fn mount_page(server: &MockServer, page: u32, html: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/catalogue/page-{}.html", page)))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(expected_hits)
        .mount(server)
        .await;
}

pub fn catalogue_config(server: &MockServer) -> CatalogueConfig {
    CatalogueConfig {
        url_template: format!("{}/catalogue/page-{{page}}.html", server.uri()),
        base_url: format!("{}/catalogue/", server.uri()),
        ..CatalogueConfig::default()
    }
}

pub fn create_manager(
    server: &MockServer,
    notifier: RecordingNotifier,
    threshold: &str,
) -> AlertManager {
    let catalogue = catalogue_config(server);
    AlertManager::new(
        Box::new(HttpCatalogueFetcher::new(catalogue.clone()).unwrap()),
        ListingParser::new(&catalogue).unwrap(),
        Box::new(notifier),
        Decimal::from_str(threshold).unwrap(),
        catalogue.currency_symbol,
    )
}
