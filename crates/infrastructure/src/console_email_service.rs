//! Email sink that writes messages to the log instead of delivering them.

use async_trait::async_trait;
use tracing::info;
use vulcan_application::EmailService;
use vulcan_core::AppResult;

/// Development email service used when SMTP is not configured.
#[derive(Clone, Debug, Default)]
pub struct ConsoleEmailService;

impl ConsoleEmailService {
    /// Creates a new console email service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailService for ConsoleEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: Option<&str>,
    ) -> AppResult<()> {
        info!(
            to,
            subject,
            has_html = html_body.is_some(),
            body = text_body,
            "email captured by console sink"
        );

        Ok(())
    }
}
