use async_trait::async_trait;
use vulcan_core::{AppResult, UserIdentity};
use vulcan_domain::{Membership, MembershipEvent};

use super::identity::ActorProfile;

/// Delivery channel of a membership notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationChannel {
    /// Welcome email sent to newly added members.
    Email,
    /// Chat webhook announcing every membership change.
    Chat,
}

impl NotificationChannel {
    /// Returns whether the channel reacts to a lifecycle event.
    #[must_use]
    pub fn handles(&self, event: MembershipEvent) -> bool {
        match self {
            Self::Email => event == MembershipEvent::Created,
            Self::Chat => true,
        }
    }
}

/// Feature toggles for notification channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Enables SMTP welcome emails.
    pub smtp_enabled: bool,
    /// Enables Slack membership announcements.
    pub slack_enabled: bool,
}

impl NotificationSettings {
    /// Returns whether a channel is switched on.
    #[must_use]
    pub fn is_enabled(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::Email => self.smtp_enabled,
            NotificationChannel::Chat => self.slack_enabled,
        }
    }
}

/// Payload handed to notifiers after a successful membership change.
#[derive(Debug, Clone)]
pub struct MembershipNotification {
    /// Lifecycle transition.
    pub event: MembershipEvent,
    /// Membership state after the change (before deletion for removals).
    pub membership: Membership,
    /// Actor who performed the change.
    pub performed_by: UserIdentity,
    /// Directory entry of the member, when it could be resolved.
    pub member: Option<ActorProfile>,
}

/// Port for best-effort membership notifications.
#[async_trait]
pub trait MembershipNotifier: Send + Sync {
    /// Channel this notifier delivers to.
    fn channel(&self) -> NotificationChannel;

    /// Delivers one notification.
    async fn notify(&self, notification: &MembershipNotification) -> AppResult<()>;
}

/// Port for email delivery.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends a plain-text or HTML email.
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: Option<&str>,
    ) -> AppResult<()>;
}
