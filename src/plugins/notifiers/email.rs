use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::PipelineConfig;
use crate::plugins::traits::{AlertMessage, Notifier};
use crate::utils::error::DeliveryError;

#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub to_email: String,
}

impl EmailConfig {
    /// The sender authenticates with its own address and credential.
    pub fn from_pipeline(config: &PipelineConfig) -> Self {
        EmailConfig {
            smtp_server: config.mail_host.clone(),
            smtp_port: config.mail_port,
            username: config.sender_address.clone(),
            password: config.sender_credential.clone(),
            from_email: config.sender_address.clone(),
            to_email: config.receiver_address.clone(),
        }
    }
}

/// Sends alerts as plain-text mail over implicit TLS (SMTPS).
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        EmailNotifier { config }
    }

    fn build_message(&self, alert: &AlertMessage) -> Result<Message, DeliveryError> {
        let email = Message::builder()
            .from(self.config.from_email.parse()?)
            .to(self.config.to_email.parse()?)
            .subject(alert.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body.clone())?;

        Ok(email)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        let credentials =
            Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_server)?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(mailer)
    }

    /// Connects and authenticates without sending anything.
    pub async fn test_connection(&self) -> Result<bool, DeliveryError> {
        Ok(self.transport()?.test_connection().await?)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, alert: &AlertMessage) -> Result<(), DeliveryError> {
        let email = self.build_message(alert)?;
        let mailer = self.transport()?;

        let response = mailer.send(email).await?;
        tracing::debug!("SMTP server accepted alert: {:?}", response.code());
        Ok(())
    }
}
