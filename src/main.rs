use anyhow::Result;
use tracing::{error, info, warn};

use price_alert::config::LoggingConfig;
use price_alert::plugins::notifiers::email::{EmailConfig, EmailNotifier};
use price_alert::utils::logging;
use price_alert::{AlertManager, AlertScheduler, PipelineConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = match PipelineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            logging::init(&LoggingConfig::default())?;
            error!("Cannot start: {}", e);
            return Err(e.into());
        }
    };
    let _log_guard = logging::init(&config.logging)?;

    info!(
        "Price alert started: threshold {}{}, catalogue {}",
        config.catalogue.currency_symbol, config.price_threshold, config.catalogue.url_template
    );

    let mailer = EmailNotifier::new(EmailConfig::from_pipeline(&config));
    match mailer.test_connection().await {
        Ok(true) => info!("Mail server {}:{} reachable", config.mail_host, config.mail_port),
        Ok(false) => warn!(
            "Mail server {}:{} refused the connection check",
            config.mail_host, config.mail_port
        ),
        Err(e) => warn!("Mail server check failed: {}", e),
    }

    let manager = AlertManager::from_config(&config)?;
    let mut scheduler = AlertScheduler::new(config.scheduler.poll_interval());
    scheduler.register(Box::new(manager), config.scheduler.interval());

    tokio::select! {
        _ = scheduler.run_forever() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Shutting down...");
        }
    }

    Ok(())
}
