//! SMTP delivery through `lettre`.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use vulcan_application::EmailService;
use vulcan_core::{AppError, AppResult};

/// Upper bound on each SMTP connection and command round trip.
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// SMTP connection settings.
#[derive(Clone, Debug)]
pub struct SmtpEmailConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// Optional username; authentication is skipped when absent.
    pub username: Option<String>,
    /// Password paired with `username`.
    pub password: Option<String>,
    /// Sender mailbox, e.g. `Vulcan <do-not-reply@example.com>`.
    pub from_address: String,
}

/// Email service delivering over SMTP with STARTTLS.
#[derive(Clone)]
pub struct SmtpEmailService {
    config: SmtpEmailConfig,
    from: Mailbox,
}

impl SmtpEmailService {
    /// Creates an SMTP email service, validating the sender address.
    pub fn new(config: SmtpEmailConfig) -> AppResult<Self> {
        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|error| AppError::Validation(format!("invalid SMTP from address: {error}")))?;

        Ok(Self { config, from })
    }

    fn transport(&self) -> AppResult<AsyncSmtpTransport<Tokio1Executor>> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|error| {
                AppError::Internal(format!("failed to create SMTP transport: {error}"))
            })?
            .port(self.config.port)
            .timeout(Some(SMTP_TIMEOUT));

        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: Option<&str>,
    ) -> AppResult<()> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|error| AppError::Validation(format!("invalid recipient address: {error}")))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject);
        let message = match html_body {
            Some(html_body) => builder.multipart(MultiPart::alternative_plain_html(
                text_body.to_owned(),
                html_body.to_owned(),
            )),
            None => builder.body(text_body.to_owned()),
        }
        .map_err(|error| AppError::Internal(format!("failed to build email: {error}")))?;

        self.transport()?
            .send(message)
            .await
            .map_err(|error| AppError::Internal(format!("failed to send email: {error}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{SMTP_TIMEOUT, SmtpEmailConfig, SmtpEmailService};

    fn config(from_address: &str) -> SmtpEmailConfig {
        SmtpEmailConfig {
            host: "localhost".to_owned(),
            port: 1025,
            username: None,
            password: None,
            from_address: from_address.to_owned(),
        }
    }

    #[test]
    fn rejects_invalid_sender() {
        assert!(SmtpEmailService::new(config("not an address")).is_err());
        assert!(SmtpEmailService::new(config("Vulcan <vulcan@example.com>")).is_ok());
    }

    #[test]
    fn transport_is_built_with_bounded_timeout() {
        assert_eq!(SMTP_TIMEOUT, Duration::from_secs(10));

        let service = SmtpEmailService::new(config("Vulcan <vulcan@example.com>"));
        assert!(service.is_ok_and(|service| service.transport().is_ok()));
    }
}
