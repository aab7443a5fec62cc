use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use vulcan_application::{EmailService, MembershipNotifier};
use vulcan_core::AppError;
use vulcan_infrastructure::{
    ConsoleEmailService, EmailMembershipNotifier, SlackMembershipNotifier, SmtpEmailConfig,
    SmtpEmailService,
};

use crate::api_config::{ApiConfig, EmailProviderConfig};

const SLACK_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the notifiers for every channel switched on in the configuration.
pub fn build_membership_notifiers(
    config: &ApiConfig,
) -> Result<Vec<Arc<dyn MembershipNotifier>>, AppError> {
    let mut notifiers: Vec<Arc<dyn MembershipNotifier>> = Vec::new();

    if config.notifications.smtp_enabled {
        notifiers.push(Arc::new(EmailMembershipNotifier::new(
            build_email_service(config)?,
            config.frontend_url.as_str(),
        )));
    }

    if config.notifications.slack_enabled {
        let webhook_url = config.slack_webhook_url.clone().ok_or_else(|| {
            AppError::Validation("SLACK_WEBHOOK_URL is required when Slack is enabled".to_owned())
        })?;
        let http_client = reqwest::Client::builder()
            .timeout(SLACK_TIMEOUT)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build slack http client: {error}"))
            })?;

        notifiers.push(Arc::new(SlackMembershipNotifier::new(
            http_client,
            webhook_url,
            config.frontend_url.as_str(),
        )));
    }

    info!(
        smtp_enabled = config.notifications.smtp_enabled,
        slack_enabled = config.notifications.slack_enabled,
        "membership notifiers configured"
    );

    Ok(notifiers)
}

fn build_email_service(config: &ApiConfig) -> Result<Arc<dyn EmailService>, AppError> {
    let service: Arc<dyn EmailService> = match &config.email_provider {
        EmailProviderConfig::Console => Arc::new(ConsoleEmailService::new()),
        EmailProviderConfig::Smtp(smtp) => {
            let smtp_config = SmtpEmailConfig {
                host: smtp.host.clone(),
                port: smtp.port,
                username: smtp.username.clone(),
                password: smtp.password.clone(),
                from_address: smtp.from_address.clone(),
            };
            Arc::new(SmtpEmailService::new(smtp_config)?)
        }
    };

    Ok(service)
}
