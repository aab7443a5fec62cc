use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use vulcan_application::{MembershipNotification, MembershipNotifier, NotificationChannel};
use vulcan_core::{AppError, AppResult};
use vulcan_domain::MembershipEvent;

/// Incoming-webhook message body.
#[derive(Debug, Serialize)]
pub struct SlackMessage {
    /// Fallback text shown in notifications.
    pub text: String,
    /// Block kit layout.
    pub blocks: Vec<Value>,
}

/// Announces membership changes on a Slack incoming webhook.
pub struct SlackMembershipNotifier {
    http_client: reqwest::Client,
    webhook_url: String,
    app_url: String,
}

impl SlackMembershipNotifier {
    /// Creates a notifier posting to `webhook_url`.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        webhook_url: impl Into<String>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            webhook_url: webhook_url.into(),
            app_url: app_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Renders the webhook payload for one notification.
    #[must_use]
    pub fn build_message(&self, notification: &MembershipNotification) -> SlackMessage {
        let membership = &notification.membership;
        let target = membership.target();
        let label = target.membership_type().label();
        let member = notification
            .member
            .as_ref()
            .map_or_else(|| membership.actor_id().to_string(), |member| {
                member.display_name.clone()
            });
        let actor = notification.performed_by.display_name();

        let (header, text) = match notification.event {
            MembershipEvent::Created => (
                format!("New {label} member"),
                format!("{actor} added {member} as {}", membership.role()),
            ),
            MembershipEvent::Updated => (
                format!("{label} membership updated"),
                format!("{actor} changed {member} to {}", membership.role()),
            ),
            MembershipEvent::Removed => (
                format!("{label} member removed"),
                format!("{actor} removed {member}"),
            ),
        };
        let link = format!("{}{}", self.app_url, target.resource_path());

        SlackMessage {
            text: format!("{header}: {text}"),
            blocks: vec![
                json!({
                    "type": "header",
                    "text": { "type": "plain_text", "text": header },
                }),
                json!({
                    "type": "section",
                    "text": { "type": "mrkdwn", "text": format!("{text}\n<{link}|Open {label}>") },
                }),
                json!({
                    "type": "context",
                    "elements": [{
                        "type": "mrkdwn",
                        "text": notification
                            .event
                            .notification_name(target.membership_type()),
                    }],
                }),
            ],
        }
    }
}

#[async_trait]
impl MembershipNotifier for SlackMembershipNotifier {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Chat
    }

    async fn notify(&self, notification: &MembershipNotification) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.webhook_url.as_str())
            .json(&self.build_message(notification))
            .send()
            .await
            .map_err(|error| AppError::Internal(format!("slack webhook transport error: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(AppError::Internal(format!(
                "slack webhook failed with status {status}: {body}"
            )));
        }

        Ok(())
    }
}
