use async_trait::async_trait;
use reqwest::Client;

use crate::config::{CatalogueConfig, PAGE_PLACEHOLDER};
use crate::utils::error::{AppError, FetchError, Result};

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub page: u32,
    pub status: u16,
    pub body: Vec<u8>,
}

/// Retrieves one catalogue page by number. Any error means "no more pages".
#[async_trait]
pub trait CatalogueFetcher: Send + Sync {
    async fn fetch_page(&self, page: u32) -> std::result::Result<FetchedPage, FetchError>;
}

pub struct HttpCatalogueFetcher {
    client: Client,
    config: CatalogueConfig,
}

impl HttpCatalogueFetcher {
    pub fn new(config: CatalogueConfig) -> Result<Self> {
        if !config.url_template.contains(PAGE_PLACEHOLDER) {
            return Err(AppError::UrlTemplate {
                template: config.url_template,
            });
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl CatalogueFetcher for HttpCatalogueFetcher {
    async fn fetch_page(&self, page: u32) -> std::result::Result<FetchedPage, FetchError> {
        let url = self.config.page_url(page);
        tracing::info!("Scraping page {} ({})", page, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { page, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                page,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { page, source })?;

        Ok(FetchedPage {
            page,
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
